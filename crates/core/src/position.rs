//! Where to draw a vehicle, and which way it points.
//!
//! Vehicles between stops are placed on the straight line joining the two
//! stops, in proportion to how much of the leg's time remains. This ignores
//! the actual track shape and is only an approximation.

use chrono::{DateTime, Utc};
use geo::Point;
use railwatch_transit::Run;
use railwatch_transit::spatial::{compass_bearing, interpolate};
use serde::Serialize;
use tracing::debug;

use crate::departure::resolve;
use crate::phase::RunPhase;

/// Vehicle artwork is drawn pointing sideways.
pub const ICON_ALIGNMENT_DEGREES: f64 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum::Display, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IconVariant {
    /// Front-on, not rotated.
    Upright,
    Side,
    /// Mirrored side artwork, used instead of rotating past 180 degrees so the
    /// vehicle is never drawn upside down.
    SideInverted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehiclePlacement {
    pub position: Point,
    /// `None` when the vehicle is drawn upright.
    pub bearing: Option<f64>,
    pub icon: IconVariant,
    /// Share of the current leg still to run, `1.0` at the origin and `0.0` at
    /// the next stop. Only set while in transit.
    pub leg_fraction: Option<f64>,
}

impl VehiclePlacement {
    fn at_stop(position: Point) -> Self {
        Self {
            position,
            bearing: None,
            icon: IconVariant::Upright,
            leg_fraction: None,
        }
    }
}

/// Remaining share of the leg ending at the run's cursor stop.
///
/// Clamped to `[0, 1]`. Falls back to `0.0` (vehicle at the next stop) when the
/// arrival has already passed, when there is no earlier stop event to bound
/// the leg, and when both ends of the leg share a timestamp.
pub fn leg_fraction(run: &Run, now: DateTime<Utc>) -> f64 {
    let target = resolve(run.current_event(), now).delta_seconds_f64();
    if target < 0.0 {
        return 0.0;
    }

    let Some(previous) = run.previous_event() else {
        debug!(run = %run.id, "leg has no opening stop event, placing at next stop");
        return 0.0;
    };

    let leg = (run.current_event().authoritative() - previous.authoritative())
        .num_milliseconds()
        .abs() as f64
        / 1000.0;
    if leg == 0.0 {
        debug!(run = %run.id, "zero-duration leg, placing at next stop");
        return 0.0;
    }

    (target / leg).min(1.0)
}

pub fn estimate(run: &Run, phase: RunPhase, now: DateTime<Utc>) -> VehiclePlacement {
    let (RunPhase::InTransit, Some(origin)) = (phase, run.previous_stop) else {
        return VehiclePlacement::at_stop(run.next_stop);
    };
    let destination = run.next_stop;

    let fraction = leg_fraction(run, now);
    let position = interpolate(origin, destination, 1.0 - fraction);
    let bearing = (compass_bearing(origin, destination) + ICON_ALIGNMENT_DEGREES).rem_euclid(360.0);
    let icon = if destination.x() < origin.x() {
        IconVariant::SideInverted
    } else {
        IconVariant::Side
    };

    VehiclePlacement {
        position,
        bearing: Some(bearing),
        icon,
        leg_fraction: Some(fraction),
    }
}
