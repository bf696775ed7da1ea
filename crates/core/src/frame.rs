//! Everything the map draws for one refresh.

use chrono::{DateTime, Utc};
use railwatch_transit::spatial::to_lat_lng;
use railwatch_transit::{Run, RunIdentifier, Station, StationIdentifier};
use serde::Serialize;
use tracing::debug;

use crate::board::{ActiveDepartures, BoardFilter, DisplayRow};
use crate::delay::{self, DelayTier};
use crate::departure::resolve;
use crate::options::EngineOptions;
use crate::phase::{self, RunPhase};
use crate::position::{self, IconVariant};
use crate::punctuality::{self, PunctualityStat};
use crate::snapshot::Snapshot;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VehicleTooltip {
    pub route_name: String,
    pub run_id: RunIdentifier,
    pub direction: String,
    /// Stop name while standing at a platform.
    pub at_stop: Option<String>,
    /// `Departure Time` before the run starts, `Arrival Time` after.
    pub time_label: &'static str,
    pub minutes_away: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItineraryStop {
    pub stop_id: StationIdentifier,
    pub stop_name: String,
    pub minutes_away: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VehicleMarker {
    pub run_id: RunIdentifier,
    pub phase: RunPhase,
    /// `[latitude, longitude]`
    pub position: [f64; 2],
    pub bearing_degrees: Option<f64>,
    pub icon: IconVariant,
    pub delay: DelayTier,
    pub tooltip: VehicleTooltip,
    pub itinerary: Vec<ItineraryStop>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StationMarker {
    pub stop_id: StationIdentifier,
    pub name: String,
    /// `[latitude, longitude]`
    pub position: [f64; 2],
    pub rows: Vec<DisplayRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapFrame {
    pub generated_at: DateTime<Utc>,
    pub vehicles: Vec<VehicleMarker>,
    pub stations: Vec<StationMarker>,
    pub punctuality: PunctualityStat,
}

impl MapFrame {
    pub fn compute(snapshot: &Snapshot, now: DateTime<Utc>, options: &EngineOptions) -> Self {
        let vehicles: Vec<VehicleMarker> = snapshot
            .runs
            .iter()
            .filter(|run| {
                let live = run.current_event().has_estimate();
                if !live && options.require_live_estimate {
                    debug!(run = %run.id, "no realtime estimate, not drawn");
                }
                live || !options.require_live_estimate
            })
            .map(|run| vehicle_marker(snapshot, run, now, options))
            .collect();

        let active = ActiveDepartures::from_runs(&snapshot.runs);
        let filter = BoardFilter {
            now,
            show_scheduled: options.show_scheduled,
            thresholds: &options.delay,
            active: &active,
            routes: &snapshot.routes,
        };
        let stations = snapshot
            .stations
            .iter()
            .map(|station| station_marker(&filter, station))
            .collect();

        Self {
            generated_at: now,
            vehicles,
            stations,
            punctuality: punctuality::aggregate(&snapshot.stations, options.punctuality_tolerance_minutes),
        }
    }
}

fn stop_name(snapshot: &Snapshot, id: &StationIdentifier) -> String {
    snapshot
        .stops
        .stop_name(id)
        .map_or_else(|| id.to_string(), str::to_owned)
}

fn vehicle_marker(snapshot: &Snapshot, run: &Run, now: DateTime<Utc>, options: &EngineOptions) -> VehicleMarker {
    let phase = phase::classify(run);
    let placement = position::estimate(run, phase, now);
    let current = run.current_event();

    let tooltip = VehicleTooltip {
        route_name: snapshot.routes.route_label(run.route_id()),
        run_id: run.id.clone(),
        direction: snapshot.routes.direction_label(run.route_id(), &run.direction_id),
        at_stop: (phase == RunPhase::AtPlatform).then(|| stop_name(snapshot, &current.station_id)),
        time_label: match phase {
            RunPhase::NotStarted => "Departure Time",
            RunPhase::AtPlatform | RunPhase::InTransit => "Arrival Time",
        },
        minutes_away: resolve(current, now).minutes_away(),
    };

    let itinerary = run
        .events()
        .iter()
        .map(|event| ItineraryStop {
            stop_id: event.station_id.clone(),
            stop_name: stop_name(snapshot, &event.station_id),
            minutes_away: resolve(event, now).minutes_away(),
        })
        .collect();

    VehicleMarker {
        run_id: run.id.clone(),
        phase,
        position: to_lat_lng(placement.position),
        bearing_degrees: placement.bearing,
        icon: placement.icon,
        delay: delay::classify(current, &options.delay),
        tooltip,
        itinerary,
    }
}

fn station_marker(filter: &BoardFilter<'_>, station: &Station) -> StationMarker {
    StationMarker {
        stop_id: station.id.clone(),
        name: station.name.to_string(),
        position: to_lat_lng(station.location),
        rows: filter.board(&station.departures),
    }
}
