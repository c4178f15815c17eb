use serde::Serialize;

use super::azimuth::resolve_perpendicular_azimuth;
use crate::geodesic::GeodesicEngine;
use crate::types::{Azimuth, Point};

/// A snapped point together with the bearing and distance used to reach it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerpendicularDestination {
    /// Snapped point, geodetic convention
    pub point: Point,
    /// Bearing from the last point, degrees
    pub azimuth: Azimuth,
    /// Geodesic distance from the last point to the cursor, meters
    pub distance: f64,
}

impl PerpendicularDestination {
    /// Keeps the cursor's distance from `last_point` and snaps its direction onto the
    /// perpendicular of the segment `penultimate_point -> last_point`.
    pub fn resolve<G: GeodesicEngine + ?Sized>(
        engine: &G,
        last_point: Point,
        penultimate_point: Point,
        current_point: Point,
    ) -> Self {
        let distance = engine.inverse(last_point, current_point).distance;
        let azimuth = resolve_perpendicular_azimuth(engine, last_point, penultimate_point, current_point);
        let point = engine.direct(last_point, azimuth, distance);

        Self {
            point,
            azimuth,
            distance,
        }
    }
}

/// Returns the point on the perpendicular through `last_point` at the cursor's distance
pub fn resolve_perpendicular_destination<G: GeodesicEngine + ?Sized>(
    engine: &G,
    last_point: Point,
    penultimate_point: Point,
    current_point: Point,
) -> Point {
    PerpendicularDestination::resolve(engine, last_point, penultimate_point, current_point).point
}
