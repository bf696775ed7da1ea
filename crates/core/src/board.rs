//! Departure boards shown on station markers.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use railwatch_transit::{
    DirectionIdentifier, RouteDirectory, RouteIdentifier, Run, RunIdentifier, StationIdentifier, StopEvent,
};
use serde::Serialize;

use crate::delay::{DelayThresholds, DelayTier, classify, late_minutes};
use crate::departure::resolve;

/// Departures that vehicles are currently approaching or standing at.
///
/// These stay on their station's board even after their time has slipped
/// into the past.
#[derive(Clone, Debug, Default)]
pub struct ActiveDepartures(HashSet<(RunIdentifier, StationIdentifier)>);

impl ActiveDepartures {
    pub fn from_runs<'a>(runs: impl IntoIterator<Item = &'a Run>) -> Self {
        Self(
            runs.into_iter()
                .map(|run| {
                    let event = run.current_event();
                    (event.run_id.clone(), event.station_id.clone())
                })
                .collect(),
        )
    }

    pub fn contains(&self, event: &StopEvent) -> bool {
        self.0.contains(&(event.run_id.clone(), event.station_id.clone()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowSource {
    Estimated { tier: DelayTier, late_minutes: i64 },
    Scheduled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub run_id: RunIdentifier,
    pub route_id: RouteIdentifier,
    pub route_name: String,
    pub direction_id: DirectionIdentifier,
    pub direction_name: String,
    pub minutes_away: i64,
    #[serde(flatten)]
    pub source: RowSource,
}

impl DisplayRow {
    pub fn highlight(&self) -> Option<&'static str> {
        match self.source {
            RowSource::Estimated { tier, .. } => tier.highlight(),
            RowSource::Scheduled => None,
        }
    }
}

impl fmt::Display for DisplayRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.source {
            RowSource::Estimated { .. } => "(Estimated)",
            RowSource::Scheduled => "(Scheduled)",
        };
        write!(
            f,
            "{label} {} (Direction: {}) -> {} mins",
            self.route_name, self.direction_name, self.minutes_away
        )?;

        match self.source {
            RowSource::Estimated { late_minutes, .. } if late_minutes > 0 => {
                write!(f, " ({late_minutes} min late)")
            }
            RowSource::Estimated { late_minutes, .. } if late_minutes < 0 => {
                write!(f, " ({} min early)", -late_minutes)
            }
            _ => Ok(()),
        }
    }
}

pub struct BoardFilter<'a> {
    pub now: DateTime<Utc>,
    pub show_scheduled: bool,
    pub thresholds: &'a DelayThresholds,
    pub active: &'a ActiveDepartures,
    pub routes: &'a RouteDirectory,
}

impl BoardFilter<'_> {
    /// Rows for a station's departures, in the order given.
    ///
    /// Past departures are dropped unless a vehicle is still on them, and
    /// timetable-only departures appear only with `show_scheduled`.
    pub fn board(&self, events: &[StopEvent]) -> Vec<DisplayRow> {
        events.iter().filter_map(|event| self.row(event)).collect()
    }

    fn row(&self, event: &StopEvent) -> Option<DisplayRow> {
        let resolved = resolve(event, self.now);
        if resolved.delta_minutes() < 0 && !self.active.contains(event) {
            return None;
        }

        let source = match late_minutes(event) {
            Some(late_minutes) => RowSource::Estimated {
                tier: classify(event, self.thresholds),
                late_minutes,
            },
            None if self.show_scheduled => RowSource::Scheduled,
            None => return None,
        };

        Some(DisplayRow {
            run_id: event.run_id.clone(),
            route_id: event.route_id.clone(),
            route_name: self.routes.route_label(&event.route_id),
            direction_id: event.direction_id.clone(),
            direction_name: self.routes.direction_label(&event.route_id, &event.direction_id),
            minutes_away: resolved.minutes_away(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use chrono::Duration;

    fn filter<'a>(
        active: &'a ActiveDepartures,
        routes: &'a RouteDirectory,
        thresholds: &'a DelayThresholds,
        show_scheduled: bool,
    ) -> BoardFilter<'a> {
        BoardFilter {
            now: t0(),
            show_scheduled,
            thresholds,
            active,
            routes,
        }
    }

    #[test]
    fn test_drops_past_departures_except_active() {
        let now = t0();
        let events: Vec<StopEvent> = [-5, -1, 0, 3, 10]
            .into_iter()
            .enumerate()
            .map(|(i, minutes)| {
                station_event("1071", &format!("run_{i}"), now + Duration::minutes(minutes)).with_delay(0)
            })
            .collect();

        // cursor of run_2 points at the 0-minute departure
        let run = RunBuilder::new()
            .run_id("run_2")
            .station("1071", 0, false)
            .next_stop((-37.81, 144.96))
            .build();
        let active = ActiveDepartures::from_runs([&run]);
        let routes = RouteDirectory::new();
        let thresholds = DelayThresholds::default();

        let rows = filter(&active, &routes, &thresholds, false).board(&events);
        let kept: Vec<&str> = rows.iter().map(|row| row.run_id.as_str()).collect();
        assert_eq!(kept, vec!["run_2", "run_3", "run_4"]);
        assert_eq!(rows.iter().map(|row| row.minutes_away).collect::<Vec<_>>(), vec![0, 3, 10]);
    }

    #[test]
    fn test_active_departure_survives_going_negative() {
        let now = t0();
        let events = vec![station_event("1071", "948", now - Duration::minutes(2)).with_delay(0)];
        let run = RunBuilder::new()
            .run_id("948")
            .station("1071", -120, true)
            .next_stop((-37.81, 144.96))
            .build();

        let routes = RouteDirectory::new();
        let thresholds = DelayThresholds::default();

        let inactive = ActiveDepartures::default();
        assert!(filter(&inactive, &routes, &thresholds, false).board(&events).is_empty());

        let active = ActiveDepartures::from_runs([&run]);
        let rows = filter(&active, &routes, &thresholds, false).board(&events);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].minutes_away, 2);
    }

    #[test]
    fn test_scheduled_rows_need_flag() {
        let events = vec![
            station_event("1071", "948", t0() + Duration::minutes(4)),
            station_event("1071", "950", t0() + Duration::minutes(8)).with_delay(7 * 60),
        ];
        let active = ActiveDepartures::default();
        let routes = RouteDirectory::new();
        let thresholds = DelayThresholds::default();

        let hidden = filter(&active, &routes, &thresholds, false).board(&events);
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].run_id.as_str(), "950");

        let shown = filter(&active, &routes, &thresholds, true).board(&events);
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].source, RowSource::Scheduled);
        assert_eq!(
            shown[1].source,
            RowSource::Estimated {
                tier: DelayTier::Behind,
                late_minutes: 7
            }
        );
    }

    #[test]
    fn test_row_text() {
        let mut routes = RouteDirectory::new();
        routes.insert_route(RouteIdentifier::new("6"), "Frankston");
        routes.insert_direction(RouteIdentifier::new("6"), DirectionIdentifier::new("1"), "City");

        let events = vec![
            station_event("1071", "948", t0() + Duration::minutes(3)).with_delay(12 * 60),
            station_event("1071", "950", t0() + Duration::minutes(6)),
        ];
        let active = ActiveDepartures::default();
        let thresholds = DelayThresholds::default();
        let rows = filter(&active, &routes, &thresholds, true).board(&events);

        assert_eq!(rows[0].to_string(), "(Estimated) Frankston (Direction: City) -> 15 mins (12 min late)");
        assert_eq!(rows[0].highlight(), Some("late-highlight"));
        assert_eq!(rows[1].to_string(), "(Scheduled) Frankston (Direction: City) -> 6 mins");
    }
}
