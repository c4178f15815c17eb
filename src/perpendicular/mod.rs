//! Right-angle snapping on the ellipsoid
//!
//! [`estimate_fallback_path`] covers the bootstrap case where only one point exists.
//! [`resolve_perpendicular_azimuth`] and [`resolve_perpendicular_destination`] snap the cursor
//! onto the perpendicular through the last point of an existing segment. All three are total
//! functions: degenerate input yields degenerate output, never an error.

mod azimuth;
mod destination;
mod fallback;

pub use azimuth::{resolve_perpendicular_azimuth, Direction, QuadrantRule, Threshold};
pub use destination::{resolve_perpendicular_destination, PerpendicularDestination};
pub use fallback::estimate_fallback_path;
