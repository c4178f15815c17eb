//! Runtime configuration
//!
//! Everything is optional in the TOML file; missing keys fall back to a Web Mercator host on
//! the WGS84 ellipsoid.
//!
//! ```toml
//! host_crs = "EPSG:3857"
//! geographic_crs = "EPSG:4326"
//! backend = "builtin"
//!
//! [ellipsoid]
//! semi_major_axis = 6378137.0
//! flattening = 0.0033528106647474805
//!
//! [server]
//! bind = "0.0.0.0:3000"
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geodesic::{Ellipsoid, WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS};
use crate::projection::{epsg, Reprojection, Transformer, WebMercator};

/// Which implementation performs the host <-> geographic reprojection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Closed-form Web Mercator, only for EPSG:3857 <-> EPSG:4326
    #[default]
    Builtin,
    /// PROJ, any CRS pair it knows
    Proj,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipsoidConfig {
    pub semi_major_axis: f64,
    pub flattening: f64,
}

impl Default for EllipsoidConfig {
    fn default() -> Self {
        Self {
            semi_major_axis: WGS84_SEMI_MAJOR_AXIS,
            flattening: WGS84_FLATTENING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            body_limit_bytes: 100 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub host_crs: String,
    pub geographic_crs: String,
    pub backend: Backend,
    pub ellipsoid: EllipsoidConfig,
    pub server: ServerConfig,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            host_crs: epsg::WEB_MERCATOR.to_string(),
            geographic_crs: epsg::WGS84.to_string(),
            backend: Backend::default(),
            ellipsoid: EllipsoidConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SnapConfig {
    /// Reads and validates a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&text)
    }

    /// Parses and validates a TOML configuration string
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ellipsoid = &self.ellipsoid;
        if !(ellipsoid.semi_major_axis > 0.0 && ellipsoid.semi_major_axis.is_finite()) {
            return Err(Error::Config(format!(
                "semi_major_axis must be positive, got {}",
                ellipsoid.semi_major_axis
            )));
        }

        if !(0.0..1.0).contains(&ellipsoid.flattening) {
            return Err(Error::Config(format!(
                "flattening must lie in [0, 1), got {}",
                ellipsoid.flattening
            )));
        }

        if self.backend == Backend::Builtin
            && (self.host_crs != epsg::WEB_MERCATOR || self.geographic_crs != epsg::WGS84)
        {
            return Err(Error::Config(format!(
                "builtin backend only supports {} -> {}, got {} -> {}; use backend = \"proj\"",
                epsg::WEB_MERCATOR,
                epsg::WGS84,
                self.host_crs,
                self.geographic_crs
            )));
        }

        if self.server.bind.is_empty() {
            return Err(Error::Config("server.bind must not be empty".to_string()));
        }

        Ok(())
    }

    /// Builds the geodesic engine for the configured ellipsoid
    pub fn engine(&self) -> Ellipsoid {
        Ellipsoid::new(self.ellipsoid.semi_major_axis, self.ellipsoid.flattening)
    }

    /// Builds the configured reprojection
    pub fn reprojection(&self) -> Result<Box<dyn Reprojection>> {
        match self.backend {
            Backend::Builtin => Ok(Box::new(WebMercator)),
            Backend::Proj => {
                let transformer = Transformer::new(&self.host_crs, &self.geographic_crs)?;
                debug!(
                    "PROJ reprojection {} -> {}",
                    transformer.host_crs(),
                    transformer.geographic_crs()
                );
                Ok(Box::new(transformer))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SnapConfig::default();
        assert_eq!(config.host_crs, "EPSG:3857");
        assert_eq!(config.geographic_crs, "EPSG:4326");
        assert_eq!(config.backend, Backend::Builtin);
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = SnapConfig::from_toml("").unwrap();
        assert_eq!(config, SnapConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = SnapConfig::from_toml(
            r#"
            backend = "proj"
            host_crs = "EPSG:2180"

            [server]
            bind = "127.0.0.1:8080"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend, Backend::Proj);
        assert_eq!(config.host_crs, "EPSG:2180");
        assert_eq!(config.geographic_crs, "EPSG:4326");
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.server.body_limit_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn test_builtin_rejects_other_crs() {
        let result = SnapConfig::from_toml(r#"host_crs = "EPSG:2180""#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_bad_ellipsoid() {
        let result = SnapConfig::from_toml("[ellipsoid]\nsemi_major_axis = -1.0");
        assert!(matches!(result, Err(Error::Config(_))));

        let result = SnapConfig::from_toml("[ellipsoid]\nflattening = 1.5");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let result = SnapConfig::from_toml(r#"backend = "gdal""#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ellipsoid]\nsemi_major_axis = 6371000.0\nflattening = 0.0").unwrap();

        let config = SnapConfig::load(file.path()).unwrap();
        let engine = config.engine();
        assert_eq!(engine.semi_major_axis(), 6_371_000.0);
        assert_eq!(engine.flattening(), 0.0);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = SnapConfig::load("/nonexistent/geodesic-snap.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_builtin_reprojection() {
        let reprojection = SnapConfig::default().reprojection().unwrap();
        let geographic = reprojection.to_geographic(crate::types::Point::new(0.0, 0.0)).unwrap();
        assert!(geographic.x.abs() < 1e-12 && geographic.y.abs() < 1e-12);
    }
}
