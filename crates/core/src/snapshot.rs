//! One refresh worth of backend data, decoded into the transit model.
//!
//! The top-level documents must parse; after that every station, run, route
//! and stop is decoded on its own and skipped with a warning if malformed.

use api_types::{RouteDto, RunDto, RunsEnvelope, StationDto, UniqueStopDto};
use railwatch_transit::{Result, RouteDirectory, Run, Station, StopDirectory};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::cursor::CursorLedger;

/// Raw backend documents, one element per entity.
#[derive(Clone, Debug, Default)]
pub struct SnapshotParts {
    pub stations: Vec<Value>,
    pub runs: Vec<Value>,
    pub routes: Vec<Value>,
    pub stops: Vec<Value>,
}

impl SnapshotParts {
    /// Parse the bodies of the station, run, route and stop endpoints.
    pub fn from_json(stations: &[u8], runs: &[u8], routes: &[u8], stops: &[u8]) -> Result<Self> {
        Ok(Self {
            stations: serde_json::from_slice(stations)?,
            runs: serde_json::from_slice::<RunsEnvelope>(runs)?.runs,
            routes: serde_json::from_slice(routes)?,
            stops: serde_json::from_slice(stops)?,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub stations: Vec<Station>,
    pub runs: Vec<Run>,
    pub routes: RouteDirectory,
    pub stops: StopDirectory,
    /// Entities dropped as malformed, station departures included.
    pub skipped: usize,
}

fn decode_each<T: DeserializeOwned>(values: &[Value], entity: &'static str, skipped: &mut usize) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| match serde_json::from_value::<T>(value.clone()) {
            Ok(dto) => Some(dto),
            Err(e) => {
                warn!("skipping malformed {entity}: {e}");
                *skipped += 1;
                None
            }
        })
        .collect()
}

fn convert_each<D, T>(
    dtos: &[D],
    entity: &'static str,
    skipped: &mut usize,
    mut convert: impl FnMut(&D) -> Result<T>,
) -> Vec<T> {
    dtos.iter()
        .filter_map(|dto| match convert(dto) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("skipping {entity}: {e}");
                *skipped += 1;
                None
            }
        })
        .collect()
}

impl Snapshot {
    /// Decode a snapshot. Runs without a cursor of their own take theirs from
    /// `ledger`.
    pub fn decode(parts: &SnapshotParts, ledger: &CursorLedger) -> Self {
        let mut skipped = 0;

        let station_dtos: Vec<StationDto> = decode_each(&parts.stations, "station", &mut skipped);
        let mut bad_departures = 0;
        let stations = convert_each(&station_dtos, "station", &mut skipped, |dto| {
            Station::from_wire(dto, &mut bad_departures)
        });
        skipped += bad_departures;

        let run_dtos: Vec<RunDto> = decode_each(&parts.runs, "run", &mut skipped);
        let runs = convert_each(&run_dtos, "run", &mut skipped, |dto| {
            Run::from_wire(dto, |id| ledger.get(id))
        });

        let route_dtos: Vec<RouteDto> = decode_each(&parts.routes, "route", &mut skipped);
        let routes = RouteDirectory::from_wire(&route_dtos);

        let stop_dtos: Vec<UniqueStopDto> = decode_each(&parts.stops, "stop", &mut skipped);
        let mut stops = StopDirectory::from_wire(&stop_dtos);
        for station in &stations {
            stops.insert_missing(&station.id, &station.name);
        }

        Self {
            stations,
            runs,
            routes,
            stops,
            skipped,
        }
    }
}
