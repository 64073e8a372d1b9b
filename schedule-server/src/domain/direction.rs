//! Direction of travel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when converting a value that is not a direction id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction id: {value} (must be 0 or 1)")]
pub struct InvalidDirectionId {
    value: u8,
}

/// One of the two directions a route can be travelled in.
///
/// On the wire a direction is the integer `0` or `1`. When used as a JSON
/// map key (route patterns are keyed by direction) it appears as the string
/// `"0"` or `"1"`. Directions order by their wire value, so iterating a
/// `BTreeMap<DirectionId, _>` always visits direction 0 first.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::DirectionId;
///
/// assert_eq!(DirectionId::try_from(1).unwrap(), DirectionId::Inbound);
/// assert!(DirectionId::try_from(2).is_err());
///
/// assert_eq!(DirectionId::from_query_value("0"), Some(DirectionId::Outbound));
/// assert_eq!(DirectionId::from_query_value("1"), Some(DirectionId::Inbound));
/// assert_eq!(DirectionId::from_query_value(""), None);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DirectionId {
    /// Direction 0.
    #[default]
    Outbound,
    /// Direction 1.
    Inbound,
}

impl DirectionId {
    /// Both directions, in ascending order.
    pub const ALL: [DirectionId; 2] = [DirectionId::Outbound, DirectionId::Inbound];

    /// Returns the wire value (0 or 1).
    pub fn as_u8(self) -> u8 {
        match self {
            DirectionId::Outbound => 0,
            DirectionId::Inbound => 1,
        }
    }

    /// Interpret a query parameter value.
    ///
    /// `"0"` is direction 0 and any other non-empty value is direction 1.
    /// An empty value means the parameter carries no direction.
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "" => None,
            "0" => Some(DirectionId::Outbound),
            _ => Some(DirectionId::Inbound),
        }
    }
}

impl TryFrom<u8> for DirectionId {
    type Error = InvalidDirectionId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DirectionId::Outbound),
            1 => Ok(DirectionId::Inbound),
            _ => Err(InvalidDirectionId { value }),
        }
    }
}

impl From<DirectionId> for u8 {
    fn from(direction: DirectionId) -> Self {
        direction.as_u8()
    }
}

impl fmt::Debug for DirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DirectionId({})", self.as_u8())
    }
}

impl fmt::Display for DirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn try_from_valid() {
        assert_eq!(DirectionId::try_from(0), Ok(DirectionId::Outbound));
        assert_eq!(DirectionId::try_from(1), Ok(DirectionId::Inbound));
    }

    #[test]
    fn try_from_invalid() {
        let err = DirectionId::try_from(2).unwrap_err();
        assert_eq!(err.to_string(), "invalid direction id: 2 (must be 0 or 1)");
        assert!(DirectionId::try_from(255).is_err());
    }

    #[test]
    fn query_value_mapping() {
        assert_eq!(DirectionId::from_query_value("0"), Some(DirectionId::Outbound));
        assert_eq!(DirectionId::from_query_value("1"), Some(DirectionId::Inbound));
        // Anything non-empty that isn't "0" is direction 1
        assert_eq!(DirectionId::from_query_value("2"), Some(DirectionId::Inbound));
        assert_eq!(DirectionId::from_query_value("north"), Some(DirectionId::Inbound));
        assert_eq!(DirectionId::from_query_value(""), None);
    }

    #[test]
    fn ordering_is_by_wire_value() {
        assert!(DirectionId::Outbound < DirectionId::Inbound);
        assert_eq!(DirectionId::ALL[0], DirectionId::Outbound);
    }

    #[test]
    fn serde_as_integer() {
        assert_eq!(serde_json::to_string(&DirectionId::Inbound).unwrap(), "1");
        let d: DirectionId = serde_json::from_str("0").unwrap();
        assert_eq!(d, DirectionId::Outbound);
        assert!(serde_json::from_str::<DirectionId>("3").is_err());
    }

    #[test]
    fn serde_as_map_key() {
        let map: BTreeMap<DirectionId, u32> =
            serde_json::from_str(r#"{"1": 10, "0": 20}"#).unwrap();
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec![DirectionId::Outbound, DirectionId::Inbound]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"0":20,"1":10}"#);
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(DirectionId::Inbound.to_string(), "1");
        assert_eq!(format!("{:?}", DirectionId::Outbound), "DirectionId(0)");
    }
}
