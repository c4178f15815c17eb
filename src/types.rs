//! Core data types for geodesic-snap

use serde::{Deserialize, Serialize};

/// Forward bearing in degrees, measured clockwise from north.
///
/// Values coming out of the geodesic engine lie in (-180, 180]; values produced by the
/// perpendicular resolver may fall outside that range and are normalized by the engine.
pub type Azimuth = f64;

/// An ordered pair of coordinates.
///
/// A point carries no convention tag. In the host (projected) convention `x` is the
/// easting-like and `y` the northing-like value; in the geodetic convention `x` holds
/// latitude and `y` longitude, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a geodetic-convention point from latitude/longitude in degrees
    pub const fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self::new(lat, lon)
    }

    /// Returns the point with its two components exchanged
    pub const fn swapped(self) -> Self {
        Self::new(self.y, self.x)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

/// An ordered pair of points implying a direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    /// Creates a new segment
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

/// Solution of the geodesic inverse problem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolution {
    /// Forward azimuth at the start point, in degrees
    pub azimuth: Azimuth,
    /// Ellipsoidal distance in meters
    pub distance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_swap() {
        let p = Point::new(1.5, -2.0);
        assert_eq!(p.swapped(), Point::new(-2.0, 1.5));
        assert_eq!(p.swapped().swapped(), p);
    }

    #[test]
    fn test_point_tuple_conversion() {
        let p: Point = (3.0, 4.0).into();
        assert_eq!(p, Point::new(3.0, 4.0));
        let t: (f64, f64) = p.into();
        assert_eq!(t, (3.0, 4.0));
    }

    #[test]
    fn test_point_json_shape() {
        let json = serde_json::to_string(&Point::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0}"#);
    }
}
