//! # pixkit-ops
//!
//! Raster transformation engine over [`pixkit_core::PixelBuffer`].
//!
//! Every operation is a pure function: it borrows its input, allocates a
//! new buffer for the result and never mutates the source. Numeric
//! parameters outside their documented ranges are clamped, never rejected;
//! the only errors are malformed buffers and geometry that would leave
//! nothing to draw.
//!
//! # Modules
//!
//! - [`tone`] - Brightness, contrast, saturation, temperature, presets, sharpen, vignette
//! - [`grayscale`] - Three luma schemes with brightness and contrast
//! - [`sketch`] - Blur, Sobel threshold and dilation into line art
//! - [`grid`] - Centered N x N slicing and reassembly
//! - [`composite`] - Multi-image layout and compositing
//! - [`transform`] / [`resize`] - Rotation, flips, crop, resampling
//! - [`colorspace`] - RGB <-> HSL
//! - [`filter`] - Float-plane kernels shared by the engines
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::PixelBuffer;
//! use pixkit_ops::grayscale::{to_grayscale, GrayMode};
//! use pixkit_ops::sketch::extract_sketch;
//! use pixkit_ops::tone::{apply_tone, ToneParameters};
//!
//! let img = PixelBuffer::filled(32, 32, [180, 120, 90, 255]).unwrap();
//!
//! let warm = apply_tone(&img, &ToneParameters { temperature: 70.0, ..Default::default() }).unwrap();
//! let gray = to_grayscale(&warm, GrayMode::Soft, 110.0, 120.0);
//! let lines = extract_sketch(&gray, 30.0, 50.0, 50.0).unwrap();
//! assert_eq!(lines.dimensions(), (32, 32));
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - Row-parallel per-pixel stages via Rayon
//! - `serde` - `Serialize`/`Deserialize` for every parameter record

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod colorspace;
pub mod composite;
pub mod filter;
pub mod grayscale;
pub mod grid;
pub mod parallel;
pub mod resize;
pub mod sketch;
pub mod tone;
pub mod transform;

pub use error::{OpsError, OpsResult};

pub use composite::{
    Align, AutoLayout, CompositionItem, CompositionOptions, Direction, Position, compose,
    stack_layout,
};
pub use grayscale::{GrayMode, GrayscaleOptions, to_grayscale};
pub use grid::{GridConfig, assemble_grid, slice_grid};
pub use resize::{Filter, ResizeSpec};
pub use sketch::{SketchParams, extract_sketch};
pub use tone::{FilterPreset, ToneParameters, apply_tone};

/// Clamps `v` into `lo..=hi`, mapping NaN to `neutral`.
#[inline]
pub(crate) fn clamp_or(v: f64, lo: f64, hi: f64, neutral: f64) -> f64 {
    if v.is_nan() { neutral } else { v.clamp(lo, hi) }
}

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        Align, CompositionItem, CompositionOptions, Direction, FilterPreset, GrayMode,
        GridConfig, OpsError, OpsResult, SketchParams, ToneParameters,
    };
    pub use crate::{apply_tone, compose, extract_sketch, slice_grid, to_grayscale};
}
