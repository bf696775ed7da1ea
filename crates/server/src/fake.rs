//! In-memory backend for tests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use railwatch_core::transit::{FeedFetcher, Result, TransitError};
use serde_json::{Value, json};

use crate::backend::{ROUTES_PATH, RUNS_PATH, STATIONS_PATH, STOPS_PATH};

#[derive(Default)]
pub struct FakeFetcher {
    responses: Mutex<HashMap<String, Vec<u8>>>,
    failing: Mutex<HashSet<String>>,
    gets: Mutex<HashMap<String, usize>>,
    posts: Mutex<Vec<(String, Value)>>,
}

fn departure(stop: i64, run: i64, scheduled: &str, estimated: Option<&str>) -> Value {
    json!({
        "stop_id": stop,
        "route_id": 6,
        "direction_id": 1,
        "run_id": run,
        "scheduled_departure_utc": scheduled,
        "estimated_departure_utc": estimated,
        "at_platform": false
    })
}

impl FakeFetcher {
    pub fn with_sample_feed() -> Self {
        let fetcher = Self::default();

        fetcher.respond(
            STATIONS_PATH,
            &json!([{
                "stop_id": 1071,
                "stop_name": "Flinders Street Station",
                "stop_latitude": -37.8183,
                "stop_longitude": 144.9671,
                "departures": [
                    departure(1071, 948, "2019-04-01T08:20:00Z", Some("2019-04-01T08:22:00Z"))
                ]
            }])
            .to_string(),
        );
        fetcher.respond(
            RUNS_PATH,
            &json!({
                "runs": [
                    {
                        "coordinates": {
                            "previousStopCoordinates": [-37.8183, 144.9671],
                            "nextStopCoordinates": [-37.8184, 144.9526],
                            "direction_id": 1
                        },
                        "departure": [
                            departure(1071, 948, "2019-04-01T08:20:00Z", Some("2019-04-01T08:22:00Z")),
                            departure(1181, 948, "2019-04-01T08:23:00Z", None)
                        ],
                        "currentDeparture": 1
                    },
                    {
                        "coordinates": { "nextStopCoordinates": [-37.8184, 144.9526] },
                        "departure": [departure(1181, 950, "2019-04-01T08:30:00Z", None)]
                    }
                ]
            })
            .to_string(),
        );
        fetcher.respond(
            ROUTES_PATH,
            &json!([{
                "route_id": 6,
                "route_name": "Frankston",
                "directions": [{ "direction_id": 1, "direction_name": "City (Flinders Street)" }]
            }])
            .to_string(),
        );
        fetcher.respond(
            STOPS_PATH,
            &json!([
                { "stop_id": 1071, "stop_name": "Flinders Street Station" },
                { "stop_id": 1181, "stop_name": "Southern Cross Station" }
            ])
            .to_string(),
        );

        fetcher
    }

    pub fn respond(&self, path: &str, body: &str) {
        self.failing.lock().unwrap().remove(path);
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_owned(), body.as_bytes().to_vec());
    }

    pub fn fail(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_owned());
    }

    pub fn get_count(&self, path: &str) -> usize {
        self.gets.lock().unwrap().get(path).copied().unwrap_or_default()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }
}

impl FeedFetcher for FakeFetcher {
    fn get<'a>(&'a self, path: &'a str) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            *self.gets.lock().unwrap().entry(path.to_owned()).or_default() += 1;

            if self.failing.lock().unwrap().contains(path) {
                return Err(TransitError::Network(format!("{path}: connection refused")));
            }
            self.responses
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| TransitError::Network(format!("{path}: 404 Not Found")))
        })
    }

    fn post<'a>(&'a self, path: &'a str, body: Vec<u8>) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if self.failing.lock().unwrap().contains(path) {
                return Err(TransitError::Network(format!("{path}: connection refused")));
            }
            let value = serde_json::from_slice(&body)?;
            self.posts.lock().unwrap().push((path.to_owned(), value));
            Ok(())
        })
    }
}
