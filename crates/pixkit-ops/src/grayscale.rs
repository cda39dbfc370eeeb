//! Grayscale conversion.
//!
//! Reduces each pixel to one gray value using a [`GrayMode`], then applies
//! a brightness gain and a linear contrast stretch around mid-gray 128:
//!
//! ```text
//! gray = mode(r, g, b)
//! gray = gray * brightness / 100
//! gray = (gray - 128) * contrast / 100 + 128
//! ```
//!
//! Both amounts are percentages in `0..=200` with 100 as neutral. The
//! result is written to R, G and B; alpha is left untouched.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::PixelBuffer;
//! use pixkit_ops::grayscale::{to_grayscale, GrayMode};
//!
//! let img = PixelBuffer::filled(2, 2, [255, 0, 0, 255]).unwrap();
//! let gray = to_grayscale(&img, GrayMode::Classic, 100.0, 100.0);
//! assert_eq!(gray.pixel(0, 0), [76, 76, 76, 255]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::clamp_or;
use crate::parallel::for_each_row;
use pixkit_core::{CHANNELS, Error, PixelBuffer, luma_rec601};
use tracing::trace;

/// Neutral brightness and contrast percentage.
pub const NEUTRAL_PERCENT: f64 = 100.0;

/// Upper bound of the brightness and contrast percentages.
pub const MAX_PERCENT: f64 = 200.0;

/// RGB-to-gray weighting scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum GrayMode {
    /// ITU-R BT.601 luma: `0.299 r + 0.587 g + 0.114 b`.
    #[default]
    Classic,
    /// Midpoint of the extreme channels: `(max + min) / 2`.
    HighContrast,
    /// Green-heavy mix: `0.25 r + 0.65 g + 0.10 b`.
    Soft,
}

impl GrayMode {
    /// Every mode.
    pub const ALL: [GrayMode; 3] = [Self::Classic, Self::HighContrast, Self::Soft];

    /// Gray value of one pixel, `0..=255` scale.
    #[inline]
    pub fn gray(self, r: f64, g: f64, b: f64) -> f64 {
        match self {
            Self::Classic => luma_rec601(r, g, b),
            Self::HighContrast => (r.max(g).max(b) + r.min(g).min(b)) / 2.0,
            Self::Soft => 0.25 * r + 0.65 * g + 0.10 * b,
        }
    }

    /// Returns the canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::HighContrast => "high-contrast",
            Self::Soft => "soft",
        }
    }
}

impl FromStr for GrayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.name() == key)
            .ok_or_else(|| Error::parse(format!("unknown grayscale mode '{}'", s)))
    }
}

impl fmt::Display for GrayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Grayscale settings as one record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GrayscaleOptions {
    /// Weighting scheme.
    pub mode: GrayMode,
    /// Gain percentage, `0..=200`.
    pub brightness: f64,
    /// Contrast percentage, `0..=200`.
    pub contrast: f64,
}

impl Default for GrayscaleOptions {
    fn default() -> Self {
        Self {
            mode: GrayMode::Classic,
            brightness: NEUTRAL_PERCENT,
            contrast: NEUTRAL_PERCENT,
        }
    }
}

impl GrayscaleOptions {
    /// Returns a copy with both percentages forced into `0..=200`.
    pub fn clamped(&self) -> Self {
        Self {
            mode: self.mode,
            brightness: clamp_or(self.brightness, 0.0, MAX_PERCENT, NEUTRAL_PERCENT),
            contrast: clamp_or(self.contrast, 0.0, MAX_PERCENT, NEUTRAL_PERCENT),
        }
    }

    /// Runs [`to_grayscale`] with these settings.
    pub fn apply(&self, src: &PixelBuffer) -> PixelBuffer {
        to_grayscale(src, self.mode, self.brightness, self.contrast)
    }
}

/// Converts `src` to gray with the given mode, brightness and contrast.
///
/// Out-of-range percentages are clamped into `0..=200`.
pub fn to_grayscale(src: &PixelBuffer, mode: GrayMode, brightness: f64, contrast: f64) -> PixelBuffer {
    let opts = GrayscaleOptions { mode, brightness, contrast }.clamped();
    trace!(
        width = src.width(),
        height = src.height(),
        %mode,
        brightness = opts.brightness,
        contrast = opts.contrast,
        "to_grayscale"
    );

    let gain = opts.brightness / 100.0;
    let stretch = opts.contrast / 100.0;

    let mut dst = src.clone();
    let row_len = src.width() as usize * CHANNELS;
    for_each_row(dst.data_mut(), row_len, |_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            let g = mode.gray(px[0] as f64, px[1] as f64, px[2] as f64) * gain;
            let g = ((g - 128.0) * stretch + 128.0).clamp(0.0, 255.0).round() as u8;
            px[0] = g;
            px[1] = g;
            px[2] = g;
        }
    });
    dst
}
