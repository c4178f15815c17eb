//! Right-angle snapping for points in the host CRS
//!
//! [`Snapper`] wraps the perpendicular resolvers with the geodetic adapter, so callers can pass
//! points straight from the host map and get host points back.

use log::debug;
use serde::Serialize;

use crate::config::SnapConfig;
use crate::error::{Error, Result};
use crate::geodesic::{Ellipsoid, GeodesicEngine};
use crate::perpendicular::{
    estimate_fallback_path, resolve_perpendicular_azimuth, PerpendicularDestination,
};
use crate::projection::{GeodeticAdapter, Reprojection, WebMercator};
use crate::types::{Azimuth, Point};

/// How a snap result was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// Only one anchor existed; right-angle bend in host coordinates
    Fallback,
    /// Perpendicular to the last drawn segment, on the ellipsoid
    Perpendicular,
}

/// Result of [`Snapper::snap`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapOutcome {
    pub mode: SnapMode,
    /// Path from the last anchor to the snapped point, host CRS
    pub path: [Point; 2],
    /// Perpendicular bearing, absent in fallback mode
    pub azimuth: Option<Azimuth>,
}

/// Host-CRS front end to the perpendicular resolvers
pub struct Snapper<G = Ellipsoid, R = Box<dyn Reprojection>> {
    engine: G,
    adapter: GeodeticAdapter<R>,
}

impl<G: GeodesicEngine, R: Reprojection> Snapper<G, R> {
    pub fn new(engine: G, reprojection: R) -> Self {
        Self {
            engine,
            adapter: GeodeticAdapter::new(reprojection),
        }
    }

    pub fn engine(&self) -> &G {
        &self.engine
    }

    pub fn adapter(&self) -> &GeodeticAdapter<R> {
        &self.adapter
    }

    /// Perpendicular bearing through `last` for host-CRS inputs
    pub fn perpendicular_azimuth(&self, last: Point, penultimate: Point, cursor: Point) -> Result<Azimuth> {
        let last = self.adapter.to_geodetic_convention(last)?;
        let penultimate = self.adapter.to_geodetic_convention(penultimate)?;
        let cursor = self.adapter.to_geodetic_convention(cursor)?;

        Ok(resolve_perpendicular_azimuth(&self.engine, last, penultimate, cursor))
    }

    /// Snapped destination for host-CRS inputs. The returned point is in the host CRS; bearing
    /// and distance are geodesic.
    pub fn perpendicular_destination(
        &self,
        last: Point,
        penultimate: Point,
        cursor: Point,
    ) -> Result<PerpendicularDestination> {
        let geodetic_last = self.adapter.to_geodetic_convention(last)?;
        let geodetic_penultimate = self.adapter.to_geodetic_convention(penultimate)?;
        let geodetic_cursor = self.adapter.to_geodetic_convention(cursor)?;

        let resolved = PerpendicularDestination::resolve(
            &self.engine,
            geodetic_last,
            geodetic_penultimate,
            geodetic_cursor,
        );

        Ok(PerpendicularDestination {
            point: self.adapter.from_geodetic_convention(resolved.point)?,
            ..resolved
        })
    }

    /// Right-angle bend from a lone anchor, computed directly in host coordinates
    pub fn fallback_path(&self, last: Point, cursor: Point) -> [Point; 2] {
        estimate_fallback_path(last, cursor)
    }

    /// Snaps `cursor` against the anchors placed so far.
    ///
    /// One anchor gives the fallback bend, two or more snap perpendicular to the segment
    /// formed by the last two anchors.
    pub fn snap(&self, anchors: &[Point], cursor: Point) -> Result<SnapOutcome> {
        let outcome = match anchors {
            [] => {
                return Err(Error::InvalidInput(
                    "at least one anchor point is required".to_string(),
                ))
            }
            [last] => SnapOutcome {
                mode: SnapMode::Fallback,
                path: self.fallback_path(*last, cursor),
                azimuth: None,
            },
            [.., penultimate, last] => {
                let destination = self.perpendicular_destination(*last, *penultimate, cursor)?;
                SnapOutcome {
                    mode: SnapMode::Perpendicular,
                    path: [*last, destination.point],
                    azimuth: Some(destination.azimuth),
                }
            }
        };

        debug!("Snapped {} anchor(s) in {:?} mode", anchors.len(), outcome.mode);
        Ok(outcome)
    }
}

impl Snapper<Ellipsoid, WebMercator> {
    /// WGS84 engine with a Web Mercator host
    pub fn web_mercator() -> Self {
        Self::new(Ellipsoid::wgs84(), WebMercator)
    }
}

impl Snapper {
    /// Builds a snapper from the configured ellipsoid and reprojection backend
    pub fn from_config(config: &SnapConfig) -> Result<Self> {
        Ok(Self::new(config.engine(), config.reprojection()?))
    }
}
