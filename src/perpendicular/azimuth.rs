use std::cmp::Ordering;

use log::debug;

use crate::geodesic::GeodesicEngine;
use crate::types::{Azimuth, Point, Segment};

/// Direction of the drawn segment (penultimate point towards last point).
///
/// Derived from plain component comparisons in the geodetic convention (`x` latitude, `y`
/// longitude), never from the azimuth. The diagonal variants require both components to
/// differ; `North`/`South` apply when the longitude (`y`) is unchanged and `East`/`West` when
/// the latitude (`x`) is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Classifies the segment running from `penultimate` to `last`.
    ///
    /// Returns `None` only when a component is NaN. Coincident points share a meridian and
    /// classify as `South`.
    pub fn classify(penultimate: Point, last: Point) -> Option<Self> {
        let along_x = last.x.partial_cmp(&penultimate.x)?;
        let along_y = last.y.partial_cmp(&penultimate.y)?;

        let direction = match (along_x, along_y) {
            (Ordering::Greater, Ordering::Greater) => Direction::NorthEast,
            (Ordering::Greater, Ordering::Less) => Direction::NorthWest,
            (Ordering::Less, Ordering::Greater) => Direction::SouthEast,
            (Ordering::Less, Ordering::Less) => Direction::SouthWest,
            (Ordering::Greater, Ordering::Equal) => Direction::North,
            (_, Ordering::Equal) => Direction::South,
            (Ordering::Equal, Ordering::Greater) => Direction::East,
            (Ordering::Equal, Ordering::Less) => Direction::West,
        };

        Some(direction)
    }

    /// Classifies a drawn segment
    pub fn of(segment: Segment) -> Option<Self> {
        Self::classify(segment.from, segment.to)
    }

    /// Returns the disambiguation rule for diagonal directions
    pub fn rule(self) -> Option<QuadrantRule> {
        match self {
            Direction::NorthEast => Some(QuadrantRule::NORTH_EAST),
            Direction::NorthWest => Some(QuadrantRule::NORTH_WEST),
            Direction::SouthEast => Some(QuadrantRule::SOUTH_EAST),
            Direction::SouthWest => Some(QuadrantRule::SOUTH_WEST),
            _ => None,
        }
    }

}

/// Bearing window in which the x-based rule of a quadrant applies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Drawn azimuth strictly greater than the bound
    Above(f64),
    /// Drawn azimuth strictly smaller than the bound
    Below(f64),
}

impl Threshold {
    /// Returns true when `azimuth` lies inside the window
    pub fn admits(self, azimuth: Azimuth) -> bool {
        match self {
            Threshold::Above(bound) => azimuth > bound,
            Threshold::Below(bound) => azimuth < bound,
        }
    }
}

/// Offsets (in degrees) added to the drawn azimuth for one diagonal quadrant.
///
/// The drawn azimuth points from the last point back to the penultimate one and wraps at
/// ±180°, so the side a `+90` lands on differs per quadrant. The threshold picks the bearing
/// range where the x comparison is reliable; outside it, or when the cursor shares the last
/// point's x, the y comparison decides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadrantRule {
    pub threshold: Threshold,
    pub x_greater: f64,
    pub x_smaller: f64,
    pub y_greater: f64,
    pub y_smaller: f64,
}

impl QuadrantRule {
    pub const NORTH_EAST: Self = Self {
        threshold: Threshold::Above(-130.0),
        x_greater: 90.0,
        x_smaller: -90.0,
        y_greater: -90.0,
        y_smaller: 90.0,
    };

    pub const NORTH_WEST: Self = Self {
        threshold: Threshold::Below(130.0),
        x_greater: -90.0,
        x_smaller: 90.0,
        y_greater: -90.0,
        y_smaller: 90.0,
    };

    pub const SOUTH_EAST: Self = Self {
        threshold: Threshold::Below(-50.0),
        x_greater: 90.0,
        x_smaller: -90.0,
        y_greater: 90.0,
        y_smaller: -90.0,
    };

    pub const SOUTH_WEST: Self = Self {
        threshold: Threshold::Above(50.0),
        x_greater: -90.0,
        x_smaller: 90.0,
        y_greater: 90.0,
        y_smaller: -90.0,
    };

    /// Picks the offset for a cursor relative to the last point.
    ///
    /// Returns `None` when neither comparison separates the cursor from the last point.
    pub fn offset(&self, drawn_azimuth: Azimuth, last_point: Point, current_point: Point) -> Option<f64> {
        if self.threshold.admits(drawn_azimuth) {
            match current_point.x.partial_cmp(&last_point.x) {
                Some(Ordering::Greater) => return Some(self.x_greater),
                Some(Ordering::Less) => return Some(self.x_smaller),
                _ => {}
            }
        }

        match current_point.y.partial_cmp(&last_point.y) {
            Some(Ordering::Greater) => Some(self.y_greater),
            Some(Ordering::Less) => Some(self.y_smaller),
            _ => None,
        }
    }
}

/// Resolves the bearing of the perpendicular through `last_point` on the cursor's side.
///
/// All three points must share one convention, the one the engine expects. Diagonal segments
/// yield the drawn azimuth (last towards penultimate) ±90°, possibly outside (-180, 180].
/// A segment along a meridian yields 90 or -90 (east or west, by the cursor's longitude); one
/// along a parallel yields 0 or 180 (north or south, by the cursor's latitude).
/// If nothing separates the cursor from the last point the drawn azimuth is returned unchanged.
pub fn resolve_perpendicular_azimuth<G: GeodesicEngine + ?Sized>(
    engine: &G,
    last_point: Point,
    penultimate_point: Point,
    current_point: Point,
) -> Azimuth {
    let drawn = Segment::new(penultimate_point, last_point);
    // measured backwards, from the last point towards the penultimate one
    let drawn_azimuth = engine.inverse(drawn.to, drawn.from).azimuth;

    let Some(direction) = Direction::of(drawn) else {
        return drawn_azimuth;
    };

    let resolved = match direction {
        // meridian: snap east or west
        Direction::North | Direction::South => {
            if current_point.y > last_point.y {
                90.0
            } else {
                -90.0
            }
        }
        // parallel: snap north or south
        Direction::East | Direction::West => {
            if current_point.x > last_point.x {
                0.0
            } else {
                180.0
            }
        }
        diagonal => diagonal
            .rule()
            .and_then(|rule| rule.offset(drawn_azimuth, last_point, current_point))
            .map_or(drawn_azimuth, |offset| drawn_azimuth + offset),
    };

    debug!(
        "Perpendicular azimuth: direction={:?}, drawn={:.6}, resolved={:.6}",
        direction, drawn_azimuth, resolved
    );

    resolved
}
