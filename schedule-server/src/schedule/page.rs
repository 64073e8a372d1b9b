//! The schedule page's data snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DirectionId, Route};

use super::content::{Alert, Fare, Holiday, Pdf, ScheduleNote, TypedRoutes};
use super::stop_tree::{StopTree, StopTreeData};

/// A stop in the schedule finder's origin list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleStop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub zone: Option<String>,
}

/// A service (calendar) the route runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub typicality: Option<String>,
    #[serde(rename = "type", default)]
    pub service_type: Option<String>,
}

impl Service {
    /// Whether the service runs on `date`, judging by its date range only.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| start <= date)
            && self.end_date.is_none_or(|end| date <= end)
    }
}

/// One path variant of the route in a given direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePattern {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub headsign: String,
    pub direction_id: DirectionId,
    #[serde(default)]
    pub route_id: String,
    #[serde(default)]
    pub representative_trip_id: String,
    #[serde(default)]
    pub representative_trip_polyline: String,
    #[serde(default)]
    pub shape_id: String,
    #[serde(default)]
    pub shape_priority: i32,
    #[serde(default)]
    pub stop_ids: Vec<String>,
    #[serde(default)]
    pub time_desc: Option<String>,
    #[serde(default)]
    pub typicality: u8,
}

/// Immutable snapshot of one route's schedule page.
///
/// Owned by the page and only ever read by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePageData {
    pub route: Route,

    /// Origin stops per direction
    #[serde(default)]
    pub stops: BTreeMap<DirectionId, Vec<SimpleStop>>,

    #[serde(default)]
    pub services: Vec<Service>,

    /// Route patterns per direction. Empty when the route is suspended.
    #[serde(rename = "route_patterns", default)]
    pub route_patterns_by_direction: BTreeMap<DirectionId, Vec<RoutePattern>>,

    #[serde(default)]
    pub schedule_note: Option<ScheduleNote>,

    pub today: NaiveDate,

    #[serde(default)]
    pub stop_tree: StopTreeData,

    #[serde(default)]
    pub alerts: Vec<Alert>,

    /// Selected bus variant (route pattern id)
    #[serde(rename = "variant", default)]
    pub bus_variant_id: Option<String>,

    /// Content teaser markup
    #[serde(default)]
    pub teasers: Option<String>,

    #[serde(default)]
    pub pdfs: Vec<Pdf>,

    #[serde(default)]
    pub connections: Vec<TypedRoutes>,

    #[serde(default)]
    pub fares: Vec<Fare>,

    #[serde(default)]
    pub fare_link: String,

    #[serde(default)]
    pub holidays: Vec<Holiday>,

    /// Hours of operation markup
    #[serde(default)]
    pub hours: String,
}

impl SchedulePageData {
    /// A route with no active patterns in either direction.
    pub fn is_suspended(&self) -> bool {
        self.route_patterns_by_direction.is_empty()
    }

    /// Directions with at least one route pattern key, ascending.
    pub fn available_directions(&self) -> impl Iterator<Item = DirectionId> + '_ {
        self.route_patterns_by_direction.keys().copied()
    }

    /// Whether the route has patterns keyed under `direction`.
    pub fn has_direction(&self, direction: DirectionId) -> bool {
        self.route_patterns_by_direction.contains_key(&direction)
    }

    /// Build the stop tree for this render.
    pub fn stop_tree(&self) -> StopTree {
        StopTree::from_stop_tree_data(self.stop_tree.clone())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Page data builders shared by the loader tests.

    use super::*;
    use crate::domain::test_route;
    use crate::schedule::stop_tree::tree_data;

    pub fn pattern(id: &str, direction: DirectionId) -> RoutePattern {
        RoutePattern {
            id: id.to_string(),
            name: id.to_string(),
            headsign: String::new(),
            direction_id: direction,
            route_id: String::new(),
            representative_trip_id: String::new(),
            representative_trip_polyline: String::new(),
            shape_id: String::new(),
            shape_priority: 0,
            stop_ids: Vec::new(),
            time_desc: None,
            typicality: 1,
        }
    }

    /// A page for a route of the given type with patterns in `directions`.
    pub fn page(route_type: u8, directions: &[DirectionId]) -> SchedulePageData {
        let route_patterns_by_direction = directions
            .iter()
            .map(|d| (*d, vec![pattern(&format!("p-{d}"), *d)]))
            .collect();

        SchedulePageData {
            route: test_route("R", route_type),
            stops: BTreeMap::new(),
            services: Vec::new(),
            route_patterns_by_direction,
            schedule_note: None,
            today: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            stop_tree: tree_data(&["a"], &[("a", "b")]),
            alerts: Vec::new(),
            bus_variant_id: None,
            teasers: Some("<p>teaser</p>".to_string()),
            pdfs: vec![Pdf {
                title: "Route map".to_string(),
                url: "/r.pdf".to_string(),
            }],
            connections: Vec::new(),
            fares: vec![Fare {
                title: "CharlieCard".to_string(),
                price: "$1.70".to_string(),
            }],
            fare_link: "/fares".to_string(),
            holidays: vec![Holiday {
                name: "Thanksgiving".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 11, 26).unwrap(),
            }],
            hours: "<p>5am - 1am</p>".to_string(),
        }
    }

    pub fn note() -> ScheduleNote {
        ScheduleNote {
            peak_service: "every 5 minutes".to_string(),
            offpeak_service: "every 10 minutes".to_string(),
            exceptions: Vec::new(),
            alternate_text: None,
        }
    }
}
