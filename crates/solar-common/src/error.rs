//! Error types for the solar roof engine.

use thiserror::Error;

/// Result type alias using SolarError.
pub type SolarResult<T> = Result<T, SolarError>;

/// Primary error type for raster and geometry operations.
///
/// Degenerate geometry (outlines with fewer than three points, target
/// polygons smaller than a panel) is deliberately absent: those are valid
/// inputs that produce empty results.
#[derive(Debug, Error)]
pub enum SolarError {
    // === Raster Errors ===
    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} raster")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    // === Region Errors ===
    #[error("Region contains no pixels")]
    EmptyRegion,

    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SolarError {
    /// Create an InvalidRaster error.
    pub fn invalid_raster(msg: impl Into<String>) -> Self {
        Self::InvalidRaster(msg.into())
    }

    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller can reasonably skip the failing item and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SolarError::OutOfBounds { .. } | SolarError::EmptyRegion)
    }
}

impl From<serde_json::Error> for SolarError {
    fn from(err: serde_json::Error) -> Self {
        SolarError::Config(format!("JSON error: {}", err))
    }
}
