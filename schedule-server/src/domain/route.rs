//! Routes and their transit modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Transit mode, derived from the GTFS route type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMode {
    Subway,
    CommuterRail,
    Bus,
    Ferry,
}

impl RouteMode {
    /// Classify a GTFS route type.
    ///
    /// Light rail (0) and heavy rail (1) are both subway. Unknown types
    /// have no mode.
    pub fn from_route_type(route_type: u8) -> Option<Self> {
        match route_type {
            0 | 1 => Some(RouteMode::Subway),
            2 => Some(RouteMode::CommuterRail),
            3 => Some(RouteMode::Bus),
            4 => Some(RouteMode::Ferry),
            _ => None,
        }
    }

    /// Mode name used in markup class names.
    pub fn css_name(self) -> &'static str {
        match self {
            RouteMode::Subway => "subway",
            RouteMode::CommuterRail => "commuter_rail",
            RouteMode::Bus => "bus",
            RouteMode::Ferry => "ferry",
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// A route as described by the page data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub long_name: String,

    /// GTFS route type
    #[serde(rename = "type")]
    pub route_type: u8,

    #[serde(default)]
    pub description: String,

    /// Direction names keyed by direction id ("0", "1")
    #[serde(default)]
    pub direction_names: std::collections::BTreeMap<String, Option<String>>,

    /// Direction destinations keyed by direction id ("0", "1")
    #[serde(default)]
    pub direction_destinations: std::collections::BTreeMap<String, Option<String>>,
}

impl Route {
    /// The route's mode, if its type is known.
    pub fn mode(&self) -> Option<RouteMode> {
        RouteMode::from_route_type(self.route_type)
    }

    /// Whether this is a subway or light rail route.
    pub fn is_subway(&self) -> bool {
        self.mode() == Some(RouteMode::Subway)
    }

    /// Whether this is a ferry route.
    pub fn is_ferry(&self) -> bool {
        self.mode() == Some(RouteMode::Ferry)
    }

    /// Mode name for markup, or `"unknown"`.
    pub fn mode_name(&self) -> &'static str {
        self.mode().map_or("unknown", RouteMode::css_name)
    }
}

#[cfg(test)]
pub(crate) fn test_route(id: &str, route_type: u8) -> Route {
    Route {
        id: id.to_string(),
        name: id.to_string(),
        long_name: String::new(),
        route_type,
        description: String::new(),
        direction_names: Default::default(),
        direction_destinations: Default::default(),
    }
}
