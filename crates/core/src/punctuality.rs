//! Network-wide on-time performance.
//!
//! Unlike delay tiers, punctuality counts running early as a miss too: any
//! departure that deviates from the timetable by the tolerance or more in
//! either direction is not punctual.

use std::fmt;

use railwatch_transit::Station;
use serde::Serialize;

use crate::delay::late_minutes;

/// Percentage of punctual departures, or no data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PunctualityStat(Option<f64>);

impl PunctualityStat {
    pub const NO_DATA: Self = Self(None);

    pub fn percent(self) -> Option<f64> {
        self.0
    }
}

impl fmt::Display for PunctualityStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(percent) => write!(f, "{percent:.1}%"),
            None => f.write_str("no data"),
        }
    }
}

/// Only departures carrying an estimate are evaluated.
pub fn aggregate<'a>(stations: impl IntoIterator<Item = &'a Station>, tolerance_minutes: i64) -> PunctualityStat {
    let (evaluated, off_schedule) = stations
        .into_iter()
        .flat_map(|station| &station.departures)
        .filter_map(late_minutes)
        .fold((0usize, 0usize), |(evaluated, off_schedule), minutes| {
            (evaluated + 1, off_schedule + usize::from(minutes.abs() >= tolerance_minutes))
        });

    if evaluated == 0 {
        return PunctualityStat::NO_DATA;
    }

    PunctualityStat(Some(100.0 - 100.0 * off_schedule as f64 / evaluated as f64))
}
