//! Coordinate helpers.
//!
//! Points follow the `geo` convention: `x` is longitude, `y` is latitude. The
//! backend and the map both speak `[latitude, longitude]`, so conversions go
//! through [`lat_lng`] and [`to_lat_lng`].

pub mod queries;

pub use queries::{compass_bearing, interpolate, lat_lng, to_lat_lng};
