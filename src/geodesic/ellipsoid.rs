use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};

use super::GeodesicEngine;
use crate::types::{Azimuth, InverseSolution, Point};

/// WGS84 semi-major axis in meters
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Geodesic engine on a reference ellipsoid, backed by GeographicLib's algorithms
pub struct Ellipsoid {
    geod: Geodesic,
    semi_major_axis: f64,
    flattening: f64,
}

impl Ellipsoid {
    /// Creates an engine for an ellipsoid with the given semi-major axis (meters) and flattening
    pub fn new(semi_major_axis: f64, flattening: f64) -> Self {
        Self {
            geod: Geodesic::new(semi_major_axis, flattening),
            semi_major_axis,
            flattening,
        }
    }

    /// Creates an engine on the WGS84 ellipsoid
    pub fn wgs84() -> Self {
        Self::new(WGS84_SEMI_MAJOR_AXIS, WGS84_FLATTENING)
    }

    /// Returns the semi-major axis in meters
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// Returns the flattening
    pub fn flattening(&self) -> f64 {
        self.flattening
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl std::fmt::Debug for Ellipsoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ellipsoid")
            .field("semi_major_axis", &self.semi_major_axis)
            .field("flattening", &self.flattening)
            .finish()
    }
}

impl GeodesicEngine for Ellipsoid {
    fn inverse(&self, from: Point, to: Point) -> InverseSolution {
        let (s12, azi1, _azi2, _a12): (f64, f64, f64, f64) =
            self.geod.inverse(from.x, from.y, to.x, to.y);

        InverseSolution {
            azimuth: azi1,
            distance: s12,
        }
    }

    fn direct(&self, from: Point, azimuth: Azimuth, distance: f64) -> Point {
        let (lat2, lon2): (f64, f64) = self.geod.direct(from.x, from.y, azimuth, distance);
        Point::from_lat_lon(lat2, lon2)
    }
}
