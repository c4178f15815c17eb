use std::f64::consts::{FRAC_PI_4, PI};

use super::Reprojection;
use crate::error::Result;
use crate::types::Point;

/// Sphere radius used by EPSG:3857, meters
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the projected extent of EPSG:3857
pub const HALF_SIZE: f64 = PI * EARTH_RADIUS;

/// Closed-form EPSG:3857 <-> EPSG:4326 reprojection, no PROJ database required
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebMercator;

impl Reprojection for WebMercator {
    fn to_geographic(&self, point: Point) -> Result<Point> {
        let lon = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Ok(Point::new(lon, lat))
    }

    fn from_geographic(&self, point: Point) -> Result<Point> {
        let x = EARTH_RADIUS * point.x.to_radians();
        let y = EARTH_RADIUS * (FRAC_PI_4 + point.y.to_radians() / 2.0).tan().ln();
        Ok(Point::new(x, y.clamp(-HALF_SIZE, HALF_SIZE)))
    }
}
