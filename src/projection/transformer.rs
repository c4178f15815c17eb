use crate::error::{Error, Result};
use crate::projection::Reprojection;
use crate::types::Point;
use proj::Proj;

/// Transforms points between a host CRS and a geographic CRS through PROJ
pub struct Transformer {
    forward: Proj,
    inverse: Proj,
    host_crs: String,
    geographic_crs: String,
}

impl Transformer {
    /// Creates a transformer between two CRS identifiers (e.g. "EPSG:3857", "EPSG:4326")
    pub fn new(host_crs: &str, geographic_crs: &str) -> Result<Self> {
        let forward = Proj::new_known_crs(host_crs, geographic_crs, None)
            .map_err(|e| Error::Projection(format!("Failed to create projection: {}", e)))?;

        let inverse = Proj::new_known_crs(geographic_crs, host_crs, None)
            .map_err(|e| Error::Projection(format!("Failed to create inverse projection: {}", e)))?;

        Ok(Self {
            forward,
            inverse,
            host_crs: host_crs.to_string(),
            geographic_crs: geographic_crs.to_string(),
        })
    }

    /// Returns the host CRS identifier
    pub fn host_crs(&self) -> &str {
        &self.host_crs
    }

    /// Returns the geographic CRS identifier
    pub fn geographic_crs(&self) -> &str {
        &self.geographic_crs
    }
}

impl Reprojection for Transformer {
    fn to_geographic(&self, point: Point) -> Result<Point> {
        let result = self.forward.convert((point.x, point.y))
            .map_err(|e| Error::Projection(format!("Transformation failed: {}", e)))?;

        Ok(Point::new(result.0, result.1))
    }

    fn from_geographic(&self, point: Point) -> Result<Point> {
        let result = self.inverse.convert((point.x, point.y))
            .map_err(|e| Error::Projection(format!("Inverse transformation failed: {}", e)))?;

        Ok(Point::new(result.0, result.1))
    }
}

/// Reprojects a single point from `source_crs` to `target_crs`
pub fn reproject(point: Point, source_crs: &str, target_crs: &str) -> Result<Point> {
    let proj = Proj::new_known_crs(source_crs, target_crs, None)
        .map_err(|e| Error::Projection(format!("Failed to create projection: {}", e)))?;

    let result = proj.convert((point.x, point.y))
        .map_err(|e| Error::Projection(format!("Transformation failed: {}", e)))?;

    Ok(Point::new(result.0, result.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{epsg, WebMercator};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_matches_closed_form_mercator() {
        let transformer = Transformer::new(epsg::WEB_MERCATOR, epsg::WGS84).unwrap();
        let host = Point::new(2_339_067.4, 6_841_765.2);

        let via_proj = transformer.to_geographic(host).unwrap();
        let closed_form = WebMercator.to_geographic(host).unwrap();

        assert_abs_diff_eq!(via_proj.x, closed_form.x, epsilon = 1e-7);
        assert_abs_diff_eq!(via_proj.y, closed_form.y, epsilon = 1e-7);
    }

    #[test]
    fn test_round_trip() {
        let transformer = Transformer::new(epsg::WEB_MERCATOR, epsg::WGS84).unwrap();
        assert_eq!(transformer.host_crs(), "EPSG:3857");
        assert_eq!(transformer.geographic_crs(), "EPSG:4326");

        let host = Point::new(-8_237_642.3, 4_970_241.3);
        let back = transformer.from_geographic(transformer.to_geographic(host).unwrap()).unwrap();

        assert_abs_diff_eq!(back.x, host.x, epsilon = 1e-4);
        assert_abs_diff_eq!(back.y, host.y, epsilon = 1e-4);
    }

    #[test]
    fn test_one_shot_reproject() {
        let lon_lat = reproject(Point::new(0.0, 0.0), epsg::WEB_MERCATOR, epsg::WGS84).unwrap();
        assert_abs_diff_eq!(lon_lat.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lon_lat.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_crs_is_projection_error() {
        let result = Transformer::new("EPSG:999999", epsg::WGS84);
        assert!(matches!(result, Err(Error::Projection(_))));
    }
}
