//! The origin stop chosen in the schedule finder.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The stop a rider picked as their origin, if any.
///
/// Page scripts use the empty string (or `null`) to mean "no origin
/// chosen"; both decode to [`SelectedOrigin::none`]. The empty sentinel
/// never appears inside a chosen origin.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::SelectedOrigin;
///
/// let origin = SelectedOrigin::from("place-north");
/// assert_eq!(origin.as_str(), "place-north");
/// assert!(origin.is_chosen());
///
/// assert!(!SelectedOrigin::from("").is_chosen());
/// assert_eq!(SelectedOrigin::none().as_str(), "");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub struct SelectedOrigin(Option<String>);

impl SelectedOrigin {
    /// No origin chosen.
    pub fn none() -> Self {
        SelectedOrigin(None)
    }

    /// Whether a stop has been chosen.
    pub fn is_chosen(&self) -> bool {
        self.0.is_some()
    }

    /// The stop id, or `""` when nothing is chosen.
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    /// The stop id, if one is chosen.
    pub fn stop_id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<Option<String>> for SelectedOrigin {
    fn from(value: Option<String>) -> Self {
        SelectedOrigin(value.filter(|s| !s.is_empty()))
    }
}

impl From<SelectedOrigin> for Option<String> {
    fn from(origin: SelectedOrigin) -> Self {
        origin.0
    }
}

impl From<String> for SelectedOrigin {
    fn from(value: String) -> Self {
        SelectedOrigin::from(Some(value))
    }
}

impl From<&str> for SelectedOrigin {
    fn from(value: &str) -> Self {
        SelectedOrigin::from(value.to_string())
    }
}

impl fmt::Debug for SelectedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(id) => write!(f, "SelectedOrigin({id})"),
            None => f.write_str("SelectedOrigin(none)"),
        }
    }
}

impl fmt::Display for SelectedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
