//! A single vehicle trip and the station boards it shows up on.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::*;
use crate::models::types::*;

/// One vehicle's trip as seen in the current snapshot.
///
/// The cursor is whatever the caller supplied for this refresh. It is checked
/// once on construction and never moved afterwards.
#[derive(Clone, Debug)]
pub struct Run {
    pub id: RunIdentifier,
    pub direction_id: DirectionIdentifier,
    events: Vec<StopEvent>,
    cursor: usize,
    /// Absent until the vehicle has left its first stop.
    pub previous_stop: Option<Point>,
    pub next_stop: Point,
}

impl Run {
    pub fn new(
        id: RunIdentifier,
        direction_id: DirectionIdentifier,
        events: Vec<StopEvent>,
        cursor: usize,
        previous_stop: Option<Point>,
        next_stop: Point,
    ) -> Result<Self> {
        if cursor >= events.len() {
            return Err(TransitError::CursorOutOfRange {
                run: id,
                cursor,
                len: events.len(),
            });
        }

        Ok(Self {
            id,
            direction_id,
            events,
            cursor,
            previous_stop,
            next_stop,
        })
    }

    pub fn events(&self) -> &[StopEvent] {
        &self.events
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The stop event the vehicle is approaching or standing at.
    pub fn current_event(&self) -> &StopEvent {
        &self.events[self.cursor]
    }

    /// The stop event that opened the current leg, if the cursor has moved.
    pub fn previous_event(&self) -> Option<&StopEvent> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.events.get(index))
    }

    pub fn route_id(&self) -> &RouteIdentifier {
        &self.current_event().route_id
    }
}

/// A stop location with its outbound departure board
#[derive(Clone, Debug)]
pub struct Station {
    pub id: StationIdentifier,
    pub name: Arc<str>,
    pub location: Point,
    pub departures: Vec<StopEvent>,
}
