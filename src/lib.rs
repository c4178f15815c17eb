//! geodesic-snap - right-angle snapping for line drawing on the ellipsoid
//!
//! Given the last two points of a line being drawn and the pointer position, geodesic-snap
//! finds the bearing of the perpendicular through the last point and the point on it at the
//! pointer's geodesic distance. With a single point placed it falls back to an axis-aligned
//! right-angle bend.
//!
//! # Examples
//!
//! ## Geodetic inputs
//!
//! ```
//! use geodesic_snap::{resolve_perpendicular_destination, Ellipsoid, Point};
//!
//! let engine = Ellipsoid::wgs84();
//! let last = Point::from_lat_lon(52.23, 21.01);
//! let penultimate = Point::from_lat_lon(52.20, 20.95);
//! let cursor = Point::from_lat_lon(52.25, 21.05);
//!
//! let snapped = resolve_perpendicular_destination(&engine, last, penultimate, cursor);
//! println!("snapped to lat={}, lon={}", snapped.x, snapped.y);
//! ```
//!
//! ## Host map coordinates
//!
//! ```
//! use geodesic_snap::{Point, SnapMode, Snapper};
//!
//! let snapper = Snapper::web_mercator();
//! let anchors = [Point::new(2_330_000.0, 6_830_000.0), Point::new(2_339_067.4, 6_841_765.2)];
//!
//! let outcome = snapper.snap(&anchors, Point::new(2_345_000.0, 6_845_000.0))?;
//! assert_eq!(outcome.mode, SnapMode::Perpendicular);
//! # Ok::<(), geodesic_snap::Error>(())
//! ```

pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod geodesic;
pub mod logging;
pub mod perpendicular;
pub mod projection;
pub mod snap;
pub mod types;

pub use config::{Backend, SnapConfig};
pub use error::{Error, Result};
pub use geodesic::{Ellipsoid, GeodesicEngine};
pub use perpendicular::{
    estimate_fallback_path, resolve_perpendicular_azimuth, resolve_perpendicular_destination,
    Direction, PerpendicularDestination,
};
pub use projection::{GeodeticAdapter, Reprojection, Transformer, WebMercator};
pub use snap::{SnapMode, SnapOutcome, Snapper};
pub use types::{Azimuth, InverseSolution, Point, Segment};
