//! Display-name lookups for routes, directions and stops.
//!
//! These are plain key lookups supplied by the backend. Nothing in the engine
//! depends on them except tooltip and board text.

use std::collections::HashMap;
use std::sync::Arc;

use api_types::{RouteDto, UniqueStopDto};

use crate::identifiers::*;

#[derive(Clone, Debug, Default)]
pub struct RouteDirectory {
    routes: HashMap<RouteIdentifier, Arc<str>>,
    directions: HashMap<(RouteIdentifier, DirectionIdentifier), Arc<str>>,
}

impl RouteDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_wire(routes: &[RouteDto]) -> Self {
        let mut directory = Self::new();
        for route in routes {
            let route_id = RouteIdentifier::from(&route.route_id);
            for direction in &route.directions {
                directory.insert_direction(
                    route_id.clone(),
                    DirectionIdentifier::from(&direction.direction_id),
                    &direction.direction_name,
                );
            }
            directory.insert_route(route_id, &route.route_name);
        }
        directory
    }

    pub fn insert_route(&mut self, id: RouteIdentifier, name: &str) {
        self.routes.insert(id, name.into());
    }

    pub fn insert_direction(&mut self, route: RouteIdentifier, direction: DirectionIdentifier, name: &str) {
        self.directions.insert((route, direction), name.into());
    }

    pub fn route_name(&self, id: &RouteIdentifier) -> Option<&str> {
        self.routes.get(id).map(|name| &**name)
    }

    pub fn direction_name(&self, route: &RouteIdentifier, direction: &DirectionIdentifier) -> Option<&str> {
        self.directions
            .get(&(route.clone(), direction.clone()))
            .map(|name| &**name)
    }

    /// Route name, or `Route <id>` when the directory has no entry.
    pub fn route_label(&self, id: &RouteIdentifier) -> String {
        self.route_name(id)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Route {id}"))
    }

    /// Direction name, or the bare direction id.
    pub fn direction_label(&self, route: &RouteIdentifier, direction: &DirectionIdentifier) -> String {
        self.direction_name(route, direction)
            .map(str::to_owned)
            .unwrap_or_else(|| direction.to_string())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Stop id to stop name
#[derive(Clone, Debug, Default)]
pub struct StopDirectory {
    names: HashMap<StationIdentifier, Arc<str>>,
}

impl StopDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_wire(stops: &[UniqueStopDto]) -> Self {
        let mut directory = Self::new();
        for stop in stops {
            directory.insert(StationIdentifier::from(&stop.stop_id), &stop.stop_name);
        }
        directory
    }

    pub fn insert(&mut self, id: StationIdentifier, name: &str) {
        self.names.insert(id, name.into());
    }

    /// Fill gaps from another source without overriding existing names.
    pub fn insert_missing(&mut self, id: &StationIdentifier, name: &Arc<str>) {
        self.names.entry(id.clone()).or_insert_with(|| name.clone());
    }

    pub fn stop_name(&self, id: &StationIdentifier) -> Option<&str> {
        self.names.get(id).map(|name| &**name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
