//! Core data types and errors for transit data.

use chrono::{DateTime, Duration, Utc};

use crate::identifiers::*;

// ============================================================================
// Data Structures
// ============================================================================

/// A single departure of one run from one stop
///
/// `scheduled` is always present. `estimated` is only set once the feed carries
/// realtime data for the departure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopEvent {
    pub station_id: StationIdentifier,
    pub route_id: RouteIdentifier,
    pub direction_id: DirectionIdentifier,
    pub run_id: RunIdentifier,
    pub scheduled: DateTime<Utc>,
    pub estimated: Option<DateTime<Utc>>,
    pub at_platform: bool,
}

impl StopEvent {
    pub fn new(
        station_id: StationIdentifier,
        route_id: RouteIdentifier,
        direction_id: DirectionIdentifier,
        run_id: RunIdentifier,
        scheduled: DateTime<Utc>,
    ) -> Self {
        Self {
            station_id,
            route_id,
            direction_id,
            run_id,
            scheduled,
            estimated: None,
            at_platform: false,
        }
    }

    /// Attach a realtime estimate `delay_seconds` after the scheduled time
    /// (negative for early running).
    pub fn with_delay(&self, delay_seconds: i64) -> Self {
        Self {
            estimated: Some(self.scheduled + Duration::seconds(delay_seconds)),
            ..self.clone()
        }
    }

    pub fn with_estimate(self, estimated: DateTime<Utc>) -> Self {
        Self {
            estimated: Some(estimated),
            ..self
        }
    }

    pub fn at_platform(self, at_platform: bool) -> Self {
        Self {
            at_platform,
            ..self
        }
    }

    pub fn has_estimate(&self) -> bool {
        self.estimated.is_some()
    }

    /// The estimate if there is one, else the scheduled time.
    pub fn authoritative(&self) -> DateTime<Utc> {
        self.estimated.unwrap_or(self.scheduled)
    }

    /// Estimated minus scheduled, when an estimate exists.
    pub fn schedule_deviation(&self) -> Option<Duration> {
        self.estimated.map(|estimated| estimated - self.scheduled)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Malformed {entity}: {reason}")]
    MalformedSnapshot { entity: &'static str, reason: String },

    #[error("Cursor {cursor} out of range for run {run} with {len} stop events")]
    CursorOutOfRange {
        run: RunIdentifier,
        cursor: usize,
        len: usize,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl TransitError {
    pub fn malformed(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            entity,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for TransitError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event() -> StopEvent {
        StopEvent::new(
            StationIdentifier::new("1071"),
            RouteIdentifier::new("6"),
            DirectionIdentifier::new("1"),
            RunIdentifier::new("948"),
            Utc.with_ymd_and_hms(2019, 4, 1, 8, 20, 0).unwrap(),
        )
    }

    #[test]
    fn test_authoritative_prefers_estimate() {
        let scheduled_only = event();
        assert_eq!(scheduled_only.authoritative(), scheduled_only.scheduled);
        assert!(scheduled_only.schedule_deviation().is_none());

        let delayed = scheduled_only.with_delay(420);
        assert_eq!(
            delayed.authoritative(),
            Utc.with_ymd_and_hms(2019, 4, 1, 8, 27, 0).unwrap()
        );
        assert_eq!(delayed.schedule_deviation(), Some(Duration::minutes(7)));
    }

    #[test]
    fn test_early_running_is_negative_deviation() {
        let early = event().with_delay(-120);
        assert_eq!(early.schedule_deviation(), Some(Duration::minutes(-2)));
    }

    #[test]
    fn test_error_display() {
        let err = TransitError::malformed("stop event", "missing scheduled_departure_utc");
        assert_eq!(
            err.to_string(),
            "Malformed stop event: missing scheduled_departure_utc"
        );
    }
}
