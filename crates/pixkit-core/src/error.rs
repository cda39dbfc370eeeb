//! Error types for pixkit-core operations.
//!
//! The raster engine has one error class worth distinguishing at the buffer
//! level: a buffer whose byte length disagrees with its dimensions, or whose
//! dimensions are zero. Everything numeric is clamped by the operations
//! themselves, so the variants here are about shape, never about values.
//!
//! # Usage
//!
//! ```rust
//! use pixkit_core::{Error, Result};
//!
//! fn check(width: u32, height: u32, len: usize) -> Result<()> {
//!     if len != width as usize * height as usize * 4 {
//!         return Err(Error::invalid_buffer(width, height, len, "length mismatch"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(2, 2, 16).is_ok());
//! assert!(check(2, 2, 15).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or addressing a pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Buffer length does not match `width * height * 4`, or a dimension is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_core::Error;
    ///
    /// let err = Error::invalid_buffer(0, 10, 0, "zero width");
    /// assert!(err.to_string().contains("0x10"));
    /// ```
    #[error("invalid buffer {width}x{height} with {len} bytes: {reason}")]
    InvalidBuffer {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Actual byte length
        len: usize,
        /// Why the buffer was rejected
        reason: String,
    },

    /// Region extends beyond the buffer bounds.
    #[error("region ({rx}, {ry}, {rw}x{rh}) exceeds buffer bounds {width}x{height}")]
    InvalidRegion {
        /// Region X origin
        rx: u32,
        /// Region Y origin
        ry: u32,
        /// Region width
        rw: u32,
        /// Region height
        rh: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Malformed textual input (color strings, rect specs).
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Creates an [`Error::InvalidBuffer`] error.
    #[inline]
    pub fn invalid_buffer(width: u32, height: u32, len: usize, reason: impl Into<String>) -> Self {
        Self::InvalidBuffer {
            width,
            height,
            len,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(rx: u32, ry: u32, rw: u32, rh: u32, width: u32, height: u32) -> Self {
        Self::InvalidRegion {
            rx,
            ry,
            rw,
            rh,
            width,
            height,
        }
    }

    /// Creates an [`Error::Parse`] error.
    #[inline]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Returns `true` if this is a buffer-shape error.
    #[inline]
    pub fn is_buffer_error(&self) -> bool {
        matches!(self, Self::InvalidBuffer { .. })
    }

    /// Returns `true` if this is a region error.
    #[inline]
    pub fn is_region_error(&self) -> bool {
        matches!(self, Self::InvalidRegion { .. })
    }
}
