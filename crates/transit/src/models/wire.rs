//! Conversion from backend wire types into the transit model.
//!
//! Each entity is converted on its own so that one bad record only costs that
//! record. A station drops individual bad departures; a run is rejected as a
//! whole, since dropping one of its events would shift the caller's cursor.

use std::sync::Arc;

use api_types::{RunDto, StationDto, StopEventDto};
use chrono::{DateTime, Utc};
use geo::Point;

use crate::identifiers::*;
use crate::models::run::{Run, Station};
use crate::models::types::*;
use crate::spatial::lat_lng;

fn required<'a, T>(field: &'a Option<T>, entity: &'static str, name: &str) -> Result<&'a T> {
    field
        .as_ref()
        .ok_or_else(|| TransitError::malformed(entity, format!("missing {name}")))
}

fn parse_timestamp(value: &str, entity: &'static str, name: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| TransitError::malformed(entity, format!("{name} {value:?}: {e}")))
}

fn coordinates(value: [f64; 2], entity: &'static str, name: &str) -> Result<Point> {
    let [lat, lng] = value;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(TransitError::malformed(entity, format!("{name} is not finite")));
    }
    Ok(lat_lng(lat, lng))
}

impl TryFrom<&StopEventDto> for StopEvent {
    type Error = TransitError;

    fn try_from(dto: &StopEventDto) -> Result<Self> {
        const ENTITY: &str = "stop event";

        let scheduled = parse_timestamp(
            required(&dto.scheduled_departure_utc, ENTITY, "scheduled_departure_utc")?,
            ENTITY,
            "scheduled_departure_utc",
        )?;
        let estimated = dto
            .estimated_departure_utc
            .as_deref()
            .map(|value| parse_timestamp(value, ENTITY, "estimated_departure_utc"))
            .transpose()?;

        Ok(StopEvent {
            station_id: required(&dto.stop_id, ENTITY, "stop_id")?.into(),
            route_id: required(&dto.route_id, ENTITY, "route_id")?.into(),
            direction_id: required(&dto.direction_id, ENTITY, "direction_id")?.into(),
            run_id: required(&dto.run_id, ENTITY, "run_id")?.into(),
            scheduled,
            estimated,
            at_platform: dto.at_platform,
        })
    }
}

/// Decode one stop event from an untyped JSON element.
pub fn stop_event_from_value(value: &serde_json::Value) -> Result<StopEvent> {
    let dto: StopEventDto = serde_json::from_value(value.clone())
        .map_err(|e| TransitError::malformed("stop event", e.to_string()))?;
    StopEvent::try_from(&dto)
}

impl Station {
    /// Build a station from its wire form. Malformed departures are dropped
    /// and added to `skipped`.
    pub fn from_wire(dto: &StationDto, skipped: &mut usize) -> Result<Self> {
        const ENTITY: &str = "station";

        let id = StationIdentifier::from(required(&dto.stop_id, ENTITY, "stop_id")?);
        let location = coordinates(
            [
                *required(&dto.stop_latitude, ENTITY, "stop_latitude")?,
                *required(&dto.stop_longitude, ENTITY, "stop_longitude")?,
            ],
            ENTITY,
            "stop coordinates",
        )?;

        let departures = dto
            .departures
            .iter()
            .filter_map(|value| match stop_event_from_value(value) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!("skipping departure at station {id}: {e}");
                    *skipped += 1;
                    None
                }
            })
            .collect();

        Ok(Self {
            name: dto
                .stop_name
                .as_deref()
                .map(Arc::from)
                .unwrap_or_else(|| Arc::from(id.as_str())),
            id,
            location,
            departures,
        })
    }
}

impl Run {
    /// Build a run from its wire form.
    ///
    /// `remembered` supplies the cursor carried over from the previous refresh
    /// for runs whose snapshot omits `currentDeparture`. A remembered cursor is
    /// clamped into range; a cursor sent by the backend is taken as-is and must
    /// be valid.
    pub fn from_wire(dto: &RunDto, remembered: impl FnOnce(&RunIdentifier) -> Option<usize>) -> Result<Self> {
        const ENTITY: &str = "run";

        let events = dto
            .departure
            .iter()
            .map(stop_event_from_value)
            .collect::<Result<Vec<_>>>()?;

        let first = events
            .first()
            .ok_or_else(|| TransitError::malformed(ENTITY, "no departures"))?;
        let id = first.run_id.clone();

        let direction_id = dto
            .coordinates
            .direction_id
            .as_ref()
            .map(DirectionIdentifier::from)
            .unwrap_or_else(|| first.direction_id.clone());

        let next_stop = coordinates(
            *required(&dto.coordinates.next_stop_coordinates, ENTITY, "nextStopCoordinates")?,
            ENTITY,
            "nextStopCoordinates",
        )?;
        let previous_stop = dto
            .coordinates
            .previous_stop_coordinates
            .map(|value| coordinates(value, ENTITY, "previousStopCoordinates"))
            .transpose()?;

        let cursor = match dto.current_departure {
            Some(cursor) => cursor,
            None => remembered(&id).map_or(0, |cursor| cursor.min(events.len() - 1)),
        };

        Run::new(id, direction_id, events, cursor, previous_stop, next_stop)
    }
}
