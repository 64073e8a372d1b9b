//! Route map payloads embedded in the schedule page.
//!
//! The page ships two optional JSON blobs: interactive map data and a
//! static map image with a PDF link. They are handed to the loader as raw
//! text when it is constructed and only parsed when the direction view
//! needs them. A missing blob is not an error.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// A map marker (stop or vehicle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub rotation_angle: f64,
    #[serde(default)]
    pub tooltip_text: Option<String>,
}

/// A route shape drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub id: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub dotted: bool,
    /// `[latitude, longitude]` pairs
    #[serde(default)]
    pub positions: Vec<[f64; 2]>,
}

/// Interactive map data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    #[serde(default)]
    pub default_center: Option<LatLng>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub zoom: Option<u8>,
    #[serde(default)]
    pub tile_server_url: String,
    #[serde(default)]
    pub markers: Vec<Marker>,
    #[serde(default)]
    pub polylines: Vec<Polyline>,
}

/// Pre-rendered route map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMapData {
    pub img_src: String,
    pub pdf_url: String,
}

/// Which embedded payload failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    MapData,
    StaticMapData,
}

impl PayloadKind {
    /// Element id the payload is embedded under in the page.
    pub fn element_id(self) -> &'static str {
        match self {
            PayloadKind::MapData => "js-map-data",
            PayloadKind::StaticMapData => "static-map-data",
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.element_id())
    }
}

/// An embedded payload that is present but not valid JSON for its type.
#[derive(Debug, thiserror::Error)]
#[error("malformed {kind} payload: {source}")]
pub struct MalformedPayload {
    pub kind: PayloadKind,
    #[source]
    pub source: serde_json::Error,
}

/// What to do with a payload that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadPolicy {
    /// Report an error (development).
    Strict,
    /// Log and treat the payload as absent (production).
    Lenient,
}

impl Default for PayloadPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            PayloadPolicy::Strict
        } else {
            PayloadPolicy::Lenient
        }
    }
}

impl std::str::FromStr for PayloadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(PayloadPolicy::Strict),
            "lenient" => Ok(PayloadPolicy::Lenient),
            other => Err(format!("unknown payload policy: {other}")),
        }
    }
}

/// Raw JSON text of the two embedded payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedPayloads {
    pub map_data: Option<String>,
    pub static_map_data: Option<String>,
}

impl EmbeddedPayloads {
    pub fn new(map_data: Option<String>, static_map_data: Option<String>) -> Self {
        Self {
            map_data,
            static_map_data,
        }
    }

    /// Parse the interactive map payload, if present.
    pub fn map_data(&self, policy: PayloadPolicy) -> Result<Option<MapData>, MalformedPayload> {
        parse_payload(self.map_data.as_deref(), PayloadKind::MapData, policy)
    }

    /// Parse the static map payload, if present.
    pub fn static_map_data(
        &self,
        policy: PayloadPolicy,
    ) -> Result<Option<StaticMapData>, MalformedPayload> {
        parse_payload(
            self.static_map_data.as_deref(),
            PayloadKind::StaticMapData,
            policy,
        )
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(
    raw: Option<&str>,
    kind: PayloadKind,
    policy: PayloadPolicy,
) -> Result<Option<T>, MalformedPayload> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match serde_json::from_str::<serde_json::Value>(raw).and_then(parse_object) {
        Ok(value) => Ok(Some(value)),
        Err(source) => match policy {
            PayloadPolicy::Strict => Err(MalformedPayload { kind, source }),
            PayloadPolicy::Lenient => {
                warn!(payload = %kind, error = %source, "ignoring malformed embedded payload");
                Ok(None)
            }
        },
    }
}

/// Payloads are JSON objects. serde would otherwise accept an array as
/// the sequence form of a struct whose fields all have defaults.
fn parse_object<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> serde_json::Result<T> {
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}
