//! Lateness tiers for stop events.

use railwatch_transit::StopEvent;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DelayTier {
    #[default]
    OnTime,
    Behind,
    Late,
    VeryLate,
}

impl DelayTier {
    /// Style class the map uses to highlight the delay, if any.
    pub fn highlight(self) -> Option<&'static str> {
        match self {
            DelayTier::OnTime => None,
            DelayTier::Behind => Some("behind-highlight"),
            DelayTier::Late => Some("late-highlight"),
            DelayTier::VeryLate => Some("very-late-highlight"),
        }
    }
}

/// Minute boundaries between tiers. Each bound is inclusive of the tier it
/// opens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayThresholds {
    pub behind_minutes: i64,
    pub late_minutes: i64,
    /// Off unless configured.
    pub very_late_minutes: Option<i64>,
}

impl Default for DelayThresholds {
    fn default() -> Self {
        Self {
            behind_minutes: 5,
            late_minutes: 10,
            very_late_minutes: None,
        }
    }
}

impl DelayThresholds {
    /// Tier for a signed delay. Early running is never flagged.
    pub fn tier_for(&self, late_minutes: i64) -> DelayTier {
        match self.very_late_minutes {
            Some(very_late) if late_minutes >= very_late => DelayTier::VeryLate,
            _ if late_minutes >= self.late_minutes => DelayTier::Late,
            _ if late_minutes >= self.behind_minutes => DelayTier::Behind,
            _ => DelayTier::OnTime,
        }
    }
}

/// Estimated minus scheduled, in whole minutes truncated toward zero.
pub fn late_minutes(event: &StopEvent) -> Option<i64> {
    event.schedule_deviation().map(|deviation| deviation.num_minutes())
}

/// Events without an estimate are on time by convention.
pub fn classify(event: &StopEvent, thresholds: &DelayThresholds) -> DelayTier {
    late_minutes(event).map_or(DelayTier::OnTime, |minutes| thresholds.tier_for(minutes))
}
