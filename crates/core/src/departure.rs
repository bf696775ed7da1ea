//! Authoritative departure time for a stop event.

use chrono::{DateTime, Duration, Utc};
use railwatch_transit::StopEvent;

/// A stop event's effective time and how far it is from now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedDeparture {
    pub at: DateTime<Utc>,
    /// `at - now`; negative once the departure has passed.
    pub delta: Duration,
}

impl ResolvedDeparture {
    pub fn delta_seconds(&self) -> i64 {
        self.delta.num_seconds()
    }

    /// Sub-second precision, for interpolation.
    pub fn delta_seconds_f64(&self) -> f64 {
        self.delta.num_milliseconds() as f64 / 1000.0
    }

    /// Whole minutes, truncated toward zero.
    pub fn delta_minutes(&self) -> i64 {
        self.delta.num_minutes()
    }

    /// What boards and tooltips print: whole minutes either side of now.
    pub fn minutes_away(&self) -> i64 {
        self.delta_minutes().abs()
    }
}

/// Estimated time if present, else scheduled, and its signed distance to `now`.
pub fn resolve(event: &StopEvent, now: DateTime<Utc>) -> ResolvedDeparture {
    let at = event.authoritative();
    ResolvedDeparture {
        at,
        delta: at - now,
    }
}
