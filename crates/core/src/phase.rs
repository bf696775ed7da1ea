//! Which part of its journey a run is in.
//!
//! Evaluated fresh on every refresh from the flags the backend sends. Moving
//! the cursor between refreshes is the caller's job; see
//! [`CursorLedger`](crate::cursor::CursorLedger).

use railwatch_transit::Run;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display, strum::IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RunPhase {
    /// Waiting to leave its first stop.
    NotStarted,
    /// Standing at the cursor stop, first or mid-route.
    AtPlatform,
    /// Between the previous stop and the cursor stop.
    InTransit,
}

pub fn classify(run: &Run) -> RunPhase {
    if run.current_event().at_platform {
        RunPhase::AtPlatform
    } else if run.previous_stop.is_some() {
        RunPhase::InTransit
    } else {
        RunPhase::NotStarted
    }
}
