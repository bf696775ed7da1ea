use serde::{Deserialize, Serialize};

use crate::delay::DelayThresholds;

/// Knobs for one frame computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Show departures that only have a timetable entry on station boards.
    pub show_scheduled: bool,
    pub delay: DelayThresholds,
    /// Deviation in either direction, in whole minutes, at which a departure
    /// stops counting as punctual.
    pub punctuality_tolerance_minutes: i64,
    /// Skip runs whose current stop event carries no realtime estimate.
    pub require_live_estimate: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            show_scheduled: false,
            delay: DelayThresholds::default(),
            punctuality_tolerance_minutes: 5,
            require_live_estimate: false,
        }
    }
}
