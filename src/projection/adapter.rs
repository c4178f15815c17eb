use super::{Reprojection, WebMercator};
use crate::error::Result;
use crate::types::Point;

/// Moves points between the host convention (x, y in the host CRS) and the geodetic
/// convention (latitude, longitude) the geodesic engine expects.
#[derive(Debug, Clone)]
pub struct GeodeticAdapter<R> {
    reprojection: R,
}

impl<R: Reprojection> GeodeticAdapter<R> {
    /// Creates an adapter over the given reprojection
    pub fn new(reprojection: R) -> Self {
        Self { reprojection }
    }

    /// Host point to (latitude, longitude)
    pub fn to_geodetic_convention(&self, point: Point) -> Result<Point> {
        Ok(self.reprojection.to_geographic(point)?.swapped())
    }

    /// (latitude, longitude) back to a host point
    pub fn from_geodetic_convention(&self, point: Point) -> Result<Point> {
        self.reprojection.from_geographic(point.swapped())
    }

    /// Returns the underlying reprojection
    pub fn reprojection(&self) -> &R {
        &self.reprojection
    }
}

impl GeodeticAdapter<WebMercator> {
    /// Adapter for hosts working in EPSG:3857
    pub fn web_mercator() -> Self {
        Self::new(WebMercator)
    }
}

impl Default for GeodeticAdapter<WebMercator> {
    fn default() -> Self {
        Self::web_mercator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_abs_diff_eq;

    struct Failing;

    impl Reprojection for Failing {
        fn to_geographic(&self, _point: Point) -> Result<Point> {
            Err(Error::Projection("unsupported CRS".to_string()))
        }

        fn from_geographic(&self, _point: Point) -> Result<Point> {
            Err(Error::Projection("unsupported CRS".to_string()))
        }
    }

    #[test]
    fn test_axis_order_is_lat_lon() {
        let adapter = GeodeticAdapter::web_mercator();
        // 10 degrees east on the equator
        let host = Point::new(1_113_194.907_932_735_7, 0.0);

        let geodetic = adapter.to_geodetic_convention(host).unwrap();

        assert_abs_diff_eq!(geodetic.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(geodetic.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_round_trip_is_identity() {
        let adapter = GeodeticAdapter::default();

        for (x, y) in [(0.0, 0.0), (2_339_067.4, 6_841_765.2), (-13_627_361.0, 4_544_761.0), (16_000_000.0, -5_000_000.0)] {
            let host = Point::new(x, y);
            let back = adapter
                .from_geodetic_convention(adapter.to_geodetic_convention(host).unwrap())
                .unwrap();

            assert_abs_diff_eq!(back.x, host.x, epsilon = 1e-6);
            assert_abs_diff_eq!(back.y, host.y, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_reprojection_errors_propagate() {
        let adapter = GeodeticAdapter::new(Failing);
        assert!(matches!(adapter.to_geodetic_convention(Point::default()), Err(Error::Projection(_))));
        assert!(matches!(adapter.from_geodetic_convention(Point::default()), Err(Error::Projection(_))));
    }
}
