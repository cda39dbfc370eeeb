//! Tone parameter record.

use super::FilterPreset;
use crate::clamp_or;
use crate::resize::ResizeSpec;
use pixkit_core::Rect;

/// Neutral temperature slider position (no white-balance shift).
pub const NEUTRAL_TEMPERATURE: f64 = 50.0;

/// Parameters for [`apply_tone`](super::apply_tone).
///
/// Out-of-range values are clamped by [`clamped`](Self::clamped), never
/// rejected; NaN falls back to the neutral value of the field.
///
/// | field                                                    | range        | neutral |
/// |----------------------------------------------------------|--------------|---------|
/// | `brightness`, `contrast`, `saturation`, `highlights`, `shadows` | -100..=100 | 0 |
/// | `temperature` (maps to 2000K..=9000K)                    | 0..=100      | 50      |
/// | `sharpness`, `vignette`                                  | 0..=100      | 0       |
///
/// # Example
///
/// ```rust
/// use pixkit_ops::tone::{FilterPreset, ToneParameters};
///
/// let params = ToneParameters {
///     brightness: 20.0,
///     filter: FilterPreset::Cinema,
///     ..Default::default()
/// };
/// assert!(!params.is_identity());
/// assert!(ToneParameters::default().is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToneParameters {
    /// Lift toward white (> 0) or scale toward black (< 0).
    pub brightness: f64,
    /// Contrast around mid-gray 128.
    pub contrast: f64,
    /// HSL saturation shift.
    pub saturation: f64,
    /// Applied to pixels with luma above one half.
    pub highlights: f64,
    /// Applied to pixels with luma at or below one half.
    pub shadows: f64,
    /// White-balance slider.
    pub temperature: f64,
    /// Unsharp-mask strength.
    pub sharpness: f64,
    /// Radial darkening strength.
    pub vignette: f64,
    /// Named preset applied after temperature.
    #[cfg_attr(feature = "serde", serde(alias = "filter_preset"))]
    pub filter: FilterPreset,
    /// Rotation around the buffer center, degrees clockwise.
    pub rotation: f64,
    /// Mirror left-right.
    pub flip_horizontal: bool,
    /// Mirror top-bottom.
    pub flip_vertical: bool,
    /// Resize applied after the tone chain.
    pub resize: Option<ResizeSpec>,
    /// Crop applied last.
    pub crop: Option<Rect>,
}

impl Default for ToneParameters {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            temperature: NEUTRAL_TEMPERATURE,
            sharpness: 0.0,
            vignette: 0.0,
            filter: FilterPreset::None,
            rotation: 0.0,
            flip_horizontal: false,
            flip_vertical: false,
            resize: None,
            crop: None,
        }
    }
}

impl ToneParameters {
    /// Returns a copy with every numeric field forced into its range.
    ///
    /// Rotation is normalized into `[0, 360)`.
    pub fn clamped(&self) -> Self {
        Self {
            brightness: clamp_or(self.brightness, -100.0, 100.0, 0.0),
            contrast: clamp_or(self.contrast, -100.0, 100.0, 0.0),
            saturation: clamp_or(self.saturation, -100.0, 100.0, 0.0),
            highlights: clamp_or(self.highlights, -100.0, 100.0, 0.0),
            shadows: clamp_or(self.shadows, -100.0, 100.0, 0.0),
            temperature: clamp_or(self.temperature, 0.0, 100.0, NEUTRAL_TEMPERATURE),
            sharpness: clamp_or(self.sharpness, 0.0, 100.0, 0.0),
            vignette: clamp_or(self.vignette, 0.0, 100.0, 0.0),
            rotation: if self.rotation.is_finite() {
                self.rotation.rem_euclid(360.0)
            } else {
                0.0
            },
            ..*self
        }
    }

    /// Returns `true` if rotation or flips are requested.
    pub fn has_orientation(&self) -> bool {
        self.rotation.rem_euclid(360.0) != 0.0 || self.flip_horizontal || self.flip_vertical
    }

    /// Returns `true` if the per-pixel chain would leave every pixel unchanged.
    pub fn is_pixel_identity(&self) -> bool {
        self.brightness == 0.0
            && self.contrast == 0.0
            && self.saturation == 0.0
            && self.highlights == 0.0
            && self.shadows == 0.0
            && self.temperature == NEUTRAL_TEMPERATURE
            && self.sharpness == 0.0
            && self.vignette == 0.0
            && self.filter.is_none()
    }

    /// Returns `true` if [`apply_tone`](super::apply_tone) would return its input.
    pub fn is_identity(&self) -> bool {
        self.is_pixel_identity()
            && !self.has_orientation()
            && self.resize.is_none()
            && self.crop.is_none()
    }
}
