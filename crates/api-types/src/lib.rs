//! Wire types for the departures backend.
//!
//! The backend is loose about its JSON: ids arrive as numbers or strings and any
//! field may be missing on a given entity. Everything here deserializes
//! leniently; deciding what is actually required happens when the wire types
//! are converted into the transit model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An identifier that may be sent as a JSON number or string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{n}"),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

/// `[latitude, longitude]`
pub type WireCoordinates = [f64; 2];

/// One departure of one run from one stop.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StopEventDto {
    pub stop_id: Option<WireId>,
    pub route_id: Option<WireId>,
    pub direction_id: Option<WireId>,
    pub run_id: Option<WireId>,
    pub scheduled_departure_utc: Option<String>,
    pub estimated_departure_utc: Option<String>,
    #[serde(default)]
    pub at_platform: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StationDto {
    pub stop_id: Option<WireId>,
    pub stop_name: Option<String>,
    pub stop_latitude: Option<f64>,
    pub stop_longitude: Option<f64>,
    #[serde(default)]
    pub departures: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCoordinatesDto {
    pub previous_stop_coordinates: Option<WireCoordinates>,
    pub next_stop_coordinates: Option<WireCoordinates>,
    #[serde(rename = "direction_id")]
    pub direction_id: Option<WireId>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunDto {
    #[serde(default)]
    pub coordinates: RunCoordinatesDto,
    #[serde(default)]
    pub departure: Vec<serde_json::Value>,
    #[serde(rename = "currentDeparture")]
    pub current_departure: Option<usize>,
}

/// Body of `GET /api/train`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunsEnvelope {
    #[serde(default)]
    pub runs: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionDto {
    pub direction_id: WireId,
    pub direction_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteDto {
    pub route_id: WireId,
    pub route_name: String,
    #[serde(default)]
    pub directions: Vec<DirectionDto>,
}

/// Entry of `GET /api/uniqueStops`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UniqueStopDto {
    pub stop_id: WireId,
    pub stop_name: String,
}

/// Body of the refresh-period endpoints, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshPeriodDto {
    pub seconds: u64,
}
