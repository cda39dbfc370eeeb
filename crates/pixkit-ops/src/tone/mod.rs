//! Tone and color adjustment.
//!
//! [`apply_tone`] runs a fixed eight-stage per-pixel chain (brightness,
//! contrast, highlights/shadows, saturation, temperature, preset, sharpen,
//! vignette) between an optional orientation step and optional
//! resize/crop steps. The chain works on float intermediates and clamps
//! once at the end.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::PixelBuffer;
//! use pixkit_ops::tone::{apply_tone, FilterPreset, ToneParameters};
//!
//! let img = PixelBuffer::filled(16, 16, [120, 90, 60, 255]).unwrap();
//! let params = ToneParameters {
//!     contrast: 15.0,
//!     temperature: 65.0,
//!     filter: FilterPreset::Vintage,
//!     vignette: 30.0,
//!     ..Default::default()
//! };
//! let out = apply_tone(&img, &params).unwrap();
//! assert_eq!(out.dimensions(), (16, 16));
//! ```

mod apply;
pub mod kelvin;
mod params;
mod preset;

pub use apply::apply_tone;
pub use params::{NEUTRAL_TEMPERATURE, ToneParameters};
pub use preset::{FilterPreset, PresetValues};
