//! # pixkit-core
//!
//! Core types for pixkit raster processing.
//!
//! This crate provides the foundational types used by every pixkit crate:
//!
//! - [`PixelBuffer`] - Owned row-major RGBA8 raster with a validated length
//! - [`Rect`] - Region types for crops and blits
//! - [`Rgb`] - Opaque fill color, parseable from CSS hex strings
//! - [`REC601_LUMA`] - Luma weights shared by the tone and grayscale engines
//!
//! ## Design Philosophy
//!
//! Buffers are **values**. Every transform in `pixkit-ops` takes a buffer by
//! reference and allocates a new one for its result, so an input can never be
//! observed half-processed:
//!
//! ```
//! use pixkit_core::PixelBuffer;
//!
//! let src = PixelBuffer::filled(4, 4, [255, 255, 255, 255]).unwrap();
//! let copy = src.clone();
//! assert_eq!(src, copy);
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! pixkit-core (this crate)
//!    ^
//!    |
//!    +-- pixkit-ops (tone, grayscale, sketch, grid, compose, geometry)
//!    +-- pixkit-cli (decode -> engine -> encode)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for [`Rect`] and [`Rgb`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;
pub mod rect;

// Re-exports for convenience
pub use buffer::{check_budget, PixelBuffer, CHANNELS};
pub use error::*;
pub use pixel::{luma_rec601, Rgb, REC601_LUMA, REC601_LUMA_B, REC601_LUMA_G, REC601_LUMA_R};
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pixkit_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{PixelBuffer, CHANNELS};
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{luma_rec601, Rgb, REC601_LUMA};
    pub use crate::rect::Rect;
}
