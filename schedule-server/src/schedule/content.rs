//! Auxiliary page content shown alongside the schedule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Route;

/// A downloadable schedule or map PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pdf {
    pub title: String,
    pub url: String,
}

/// A fare product and its price, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fare {
    pub title: String,
    pub price: String,
}

/// Connecting routes grouped by mode (e.g. "Subway", "Bus").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedRoutes {
    pub group_name: String,
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// An upcoming holiday with modified service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
}

/// Exception to the regular service described in a schedule note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceException {
    #[serde(rename = "type")]
    pub exception_type: String,
    pub service: String,
}

/// Headway summary for frequent-service routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleNote {
    pub peak_service: String,
    pub offpeak_service: String,
    #[serde(default)]
    pub exceptions: Vec<ServiceException>,
    #[serde(default)]
    pub alternate_text: Option<String>,
}

/// A service alert affecting the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub header: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub severity: u8,
    #[serde(default)]
    pub lifecycle: String,
    /// "high" or "low"
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Alert {
    /// Whether the alert should be shown prominently.
    pub fn is_high_priority(&self) -> bool {
        self.priority == "high"
    }
}
