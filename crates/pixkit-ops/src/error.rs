//! Error types for raster operations.

use thiserror::Error;

/// Error type for raster operations.
///
/// Numeric parameters are clamped, never rejected, so the only failures are
/// malformed buffers and geometry that would leave nothing to draw.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpsError {
    /// Malformed input buffer or region.
    #[error(transparent)]
    Buffer(#[from] pixkit_core::Error),

    /// Crop, resize or composition would produce a zero-area result.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl OpsError {
    /// Creates an [`OpsError::InvalidGeometry`] error.
    #[inline]
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Returns `true` if this is a geometry error.
    #[inline]
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Self::InvalidGeometry(_))
    }
}

/// Result type for raster operations.
pub type OpsResult<T> = Result<T, OpsError>;
