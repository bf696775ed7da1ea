use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use railwatch_transit::spatial::lat_lng;
use railwatch_transit::{
    DirectionIdentifier, RouteIdentifier, Run, RunIdentifier, Station, StationIdentifier, StopEvent,
};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 4, 1, 8, 20, 0).unwrap()
}

pub fn event_at(scheduled: DateTime<Utc>) -> StopEvent {
    station_event("1071", "948", scheduled)
}

pub fn station_event(stop: &str, run: &str, scheduled: DateTime<Utc>) -> StopEvent {
    StopEvent::new(
        StationIdentifier::new(stop),
        RouteIdentifier::new("6"),
        DirectionIdentifier::new("1"),
        RunIdentifier::new(run),
        scheduled,
    )
}

pub fn station(stop: &str, departures: Vec<StopEvent>) -> Station {
    Station {
        id: StationIdentifier::new(stop),
        name: Arc::from(stop),
        location: lat_lng(-37.8183, 144.9671),
        departures,
    }
}

/// Runs on route 6, direction 1. Stop times are seconds relative to [`t0`].
pub struct RunBuilder {
    run_id: String,
    events: Vec<StopEvent>,
    cursor: usize,
    previous_stop: Option<(f64, f64)>,
    next_stop: (f64, f64),
}

impl RunBuilder {
    pub fn new() -> Self {
        Self {
            run_id: "948".into(),
            events: Vec::new(),
            cursor: 0,
            previous_stop: None,
            next_stop: (0.0, 0.0),
        }
    }

    pub fn run_id(mut self, run_id: &str) -> Self {
        self.run_id = run_id.into();
        self
    }

    pub fn station(mut self, stop: &str, offset_seconds: i64, at_platform: bool) -> Self {
        let event = station_event(stop, &self.run_id, t0() + Duration::seconds(offset_seconds));
        self.events.push(event.at_platform(at_platform));
        self
    }

    pub fn stop(self, offset_seconds: i64, at_platform: bool) -> Self {
        let stop = format!("stop_{}", self.events.len());
        self.station(&stop, offset_seconds, at_platform)
    }

    pub fn delayed_stop(mut self, offset_seconds: i64, delay_seconds: i64, at_platform: bool) -> Self {
        self = self.stop(offset_seconds, at_platform);
        if let Some(last) = self.events.last_mut() {
            *last = last.with_delay(delay_seconds);
        }
        self
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn previous_stop(mut self, (lat, lng): (f64, f64)) -> Self {
        self.previous_stop = Some((lat, lng));
        self
    }

    pub fn next_stop(mut self, (lat, lng): (f64, f64)) -> Self {
        self.next_stop = (lat, lng);
        self
    }

    pub fn build(self) -> Run {
        Run::new(
            RunIdentifier::new(&self.run_id),
            DirectionIdentifier::new("1"),
            self.events,
            self.cursor,
            self.previous_stop.map(|(lat, lng)| lat_lng(lat, lng)),
            lat_lng(self.next_stop.0, self.next_stop.1),
        )
        .unwrap()
    }
}
