//! Bearing and interpolation between two stops.

use geo::{HaversineBearing, Line, LineInterpolatePoint, Point};

pub fn lat_lng(lat: f64, lng: f64) -> Point {
    Point::new(lng, lat)
}

pub fn to_lat_lng(point: Point) -> [f64; 2] {
    [point.y(), point.x()]
}

/// Initial great-circle bearing from `from` to `to`, in degrees clockwise
/// from north, normalized to `[0, 360)`.
pub fn compass_bearing(from: Point, to: Point) -> f64 {
    from.haversine_bearing(to).rem_euclid(360.0)
}

/// Straight-line interpolation in coordinate space.
///
/// `weight` is how far along towards `to` the result lies and is clamped to
/// `[0, 1]`, so the result never leaves the segment. This does not follow the
/// track shape.
pub fn interpolate(from: Point, to: Point, weight: f64) -> Point {
    if !weight.is_finite() {
        return to;
    }

    Line::new(from.0, to.0)
        .line_interpolate_point(weight.clamp(0.0, 1.0))
        .unwrap_or(to)
}
