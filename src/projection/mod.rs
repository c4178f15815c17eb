//! Reprojection between the host map's CRS and geographic coordinates
//!
//! The host works in a projected CRS with (x, y) points. The geodesic engine wants
//! (latitude, longitude). [`Reprojection`] covers the CRS change, [`GeodeticAdapter`] adds the
//! axis swap on top.

mod adapter;
mod mercator;
mod transformer;

pub use adapter::GeodeticAdapter;
pub use mercator::WebMercator;
pub use transformer::{reproject, Transformer};

use crate::error::Result;
use crate::types::Point;

/// Well-known CRS identifiers
pub mod epsg {
    /// Geographic WGS84, longitude/latitude in degrees
    pub const WGS84: &str = "EPSG:4326";
    /// Spherical Web Mercator, meters
    pub const WEB_MERCATOR: &str = "EPSG:3857";
}

/// Converts points between a host CRS and geographic longitude/latitude.
///
/// Geographic points are returned and accepted as (longitude, latitude), the axis order the
/// host uses. Swapping into the engine's order is the adapter's job.
pub trait Reprojection {
    /// Host CRS to geographic (longitude, latitude)
    fn to_geographic(&self, point: Point) -> Result<Point>;

    /// Geographic (longitude, latitude) to host CRS
    fn from_geographic(&self, point: Point) -> Result<Point>;
}

impl<R: Reprojection + ?Sized> Reprojection for Box<R> {
    fn to_geographic(&self, point: Point) -> Result<Point> {
        (**self).to_geographic(point)
    }

    fn from_geographic(&self, point: Point) -> Result<Point> {
        (**self).from_geographic(point)
    }
}
