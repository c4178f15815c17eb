//! Geodesic engine boundary
//!
//! The perpendicular resolvers only need the two classical geodesic problems. Both take and
//! return points in the geodetic convention (latitude in `x`, longitude in `y`).

mod ellipsoid;

pub use ellipsoid::{Ellipsoid, WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS};

use crate::types::{Azimuth, InverseSolution, Point};

/// Solves the inverse and direct geodesic problems on a fixed ellipsoid
pub trait GeodesicEngine {
    /// Returns the forward azimuth at `from` and the distance from `from` to `to`
    fn inverse(&self, from: Point, to: Point) -> InverseSolution;

    /// Returns the point reached by travelling `distance` meters from `from` along `azimuth`.
    /// Azimuths outside (-180, 180] are accepted.
    fn direct(&self, from: Point, azimuth: Azimuth, distance: f64) -> Point;
}

impl<G: GeodesicEngine + ?Sized> GeodesicEngine for &G {
    fn inverse(&self, from: Point, to: Point) -> InverseSolution {
        (**self).inverse(from, to)
    }

    fn direct(&self, from: Point, azimuth: Azimuth, distance: f64) -> Point {
        (**self).direct(from, azimuth, distance)
    }
}
