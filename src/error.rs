//! Error types for geodesic-snap

use std::fmt;
use std::io;

/// Result type for geodesic-snap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the pure resolvers
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Reprojection error
    Projection(String),

    /// Input that cannot be resolved (e.g. no anchor point)
    InvalidInput(String),

    /// Invalid or unreadable configuration
    Config(String),

    /// CSV read/write error
    Csv(csv::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Projection(msg) => write!(f, "Projection error: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error)
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::Config(error.to_string())
    }
}
