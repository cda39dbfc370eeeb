//! The tone chain.

use std::borrow::Cow;
use std::f64::consts::FRAC_PI_2;

use super::kelvin::{slider_to_kelvin, white_balance_gains};
use super::params::NEUTRAL_TEMPERATURE;
use super::{FilterPreset, ToneParameters};
use crate::colorspace::{hsl_to_rgb255, rgb255_to_hsl};
use crate::filter::{Kernel, convolve_interior};
use crate::parallel::for_each_row;
use crate::resize::resize_to;
use crate::transform::{crop, rotate_flip};
use crate::OpsResult;
use pixkit_core::{CHANNELS, PixelBuffer, luma_rec601};
use tracing::{debug, trace};

/// Applies orientation, the tone chain, resize and crop, in that order.
///
/// Parameters are clamped first (see [`ToneParameters::clamped`]). The
/// per-pixel stages run in a fixed order on float intermediates:
///
/// 1. brightness
/// 2. contrast
/// 3. highlights / shadows
/// 4. saturation
/// 5. temperature
/// 6. filter preset
/// 7. sharpen (3x3 unsharp mask, border pixels untouched)
/// 8. vignette
///
/// Channels are rounded and clamped to `[0, 255]` once, after stage 8.
/// Stages with a neutral parameter are skipped. Alpha passes through.
///
/// # Errors
///
/// Returns [`OpsError::InvalidGeometry`](crate::OpsError::InvalidGeometry)
/// if the resize or crop would yield an empty buffer.
///
/// # Example
///
/// ```rust
/// use pixkit_core::PixelBuffer;
/// use pixkit_ops::tone::{apply_tone, ToneParameters};
///
/// let white = PixelBuffer::filled(4, 4, [255, 255, 255, 255]).unwrap();
/// let params = ToneParameters { brightness: -100.0, ..Default::default() };
/// let out = apply_tone(&white, &params).unwrap();
/// assert!(out.pixels().all(|(_, _, p)| p == [0, 0, 0, 255]));
/// ```
pub fn apply_tone(src: &PixelBuffer, params: &ToneParameters) -> OpsResult<PixelBuffer> {
    let p = params.clamped();
    trace!(
        width = src.width(),
        height = src.height(),
        brightness = p.brightness,
        contrast = p.contrast,
        saturation = p.saturation,
        temperature = p.temperature,
        preset = %p.filter,
        "apply_tone"
    );

    let oriented: Cow<'_, PixelBuffer> = if p.has_orientation() {
        Cow::Owned(rotate_flip(src, p.rotation, p.flip_horizontal, p.flip_vertical))
    } else {
        Cow::Borrowed(src)
    };

    let toned = if p.is_pixel_identity() {
        oriented.into_owned()
    } else {
        tone_chain(&oriented, &p)?
    };

    let resized = match p.resize {
        Some(spec) => resize_to(&toned, &spec)?,
        None => toned,
    };

    match p.crop {
        Some(region) => crop(&resized, region),
        None => Ok(resized),
    }
}

/// Stages 1 through 8 on an unclamped float plane.
fn tone_chain(src: &PixelBuffer, p: &ToneParameters) -> OpsResult<PixelBuffer> {
    let (w, h) = (src.width() as usize, src.height() as usize);
    let stages = PixelStages::new(p);
    debug!(?stages, "tone stages");

    let mut plane = src.to_f32();
    for_each_row(&mut plane, w * CHANNELS, |_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            let [r, g, b] = stages.apply([px[0] as f64, px[1] as f64, px[2] as f64]);
            px[0] = r as f32;
            px[1] = g as f32;
            px[2] = b as f32;
        }
    });

    if p.sharpness > 0.0 {
        plane = sharpen(&plane, w, h, p.sharpness)?;
    }
    if p.vignette > 0.0 {
        vignette(&mut plane, w, h, p.vignette);
    }

    Ok(PixelBuffer::from_f32(src.width(), src.height(), &plane)?)
}

/// Contrast curve factor for a `-100..=100` amount.
#[inline]
fn contrast_factor(contrast: f64) -> f64 {
    259.0 * (contrast + 255.0) / (255.0 * (259.0 - contrast))
}

/// Precomputed per-pixel stages 1-6; `None` means skipped.
#[derive(Debug, Clone, Copy)]
struct PixelStages {
    brightness: Option<f64>,
    contrast: Option<f64>,
    highlights: Option<f64>,
    shadows: Option<f64>,
    saturation: Option<f64>,
    white_balance: Option<[f64; 3]>,
    preset: Option<FilterPreset>,
}

impl PixelStages {
    fn new(p: &ToneParameters) -> Self {
        let nonzero = |v: f64| (v != 0.0).then_some(v);
        Self {
            brightness: nonzero(p.brightness).map(|b| b / 100.0),
            contrast: nonzero(p.contrast).map(contrast_factor),
            highlights: nonzero(p.highlights).map(|v| 1.0 + v / 200.0),
            shadows: nonzero(p.shadows).map(|v| 1.0 + v / 200.0),
            saturation: nonzero(p.saturation).map(|s| s / 100.0),
            white_balance: (p.temperature != NEUTRAL_TEMPERATURE)
                .then(|| white_balance_gains(slider_to_kelvin(p.temperature))),
            preset: (!p.filter.is_none()).then_some(p.filter),
        }
    }

    fn apply(&self, rgb: [f64; 3]) -> [f64; 3] {
        let mut rgb = rgb;

        if let Some(b) = self.brightness {
            for c in &mut rgb {
                *c = if b > 0.0 { *c + (255.0 - *c) * b } else { *c * (1.0 + b) };
            }
        }

        if let Some(f) = self.contrast {
            for c in &mut rgb {
                *c = f * (*c - 128.0) + 128.0;
            }
        }

        if self.highlights.is_some() || self.shadows.is_some() {
            let luma = luma_rec601(rgb[0], rgb[1], rgb[2]) / 255.0;
            if luma > 0.5 {
                if let Some(f) = self.highlights {
                    for c in &mut rgb {
                        *c += (255.0 - *c) * f;
                    }
                }
            } else if let Some(f) = self.shadows {
                for c in &mut rgb {
                    *c *= f;
                }
            }
        }

        if let Some(s) = self.saturation {
            let (h, sat, l) = rgb255_to_hsl(rgb[0], rgb[1], rgb[2]);
            let sat = if s > 0.0 { sat + (1.0 - sat) * s } else { sat * (1.0 + s) };
            let (r, g, b) = hsl_to_rgb255(h, sat, l);
            rgb = [r, g, b];
        }

        if let Some(gains) = self.white_balance {
            for (c, g) in rgb.iter_mut().zip(gains) {
                *c *= g;
            }
        }

        if let Some(preset) = self.preset {
            rgb = apply_preset(rgb, preset);
        }

        rgb
    }
}

/// Stage 6: a preset's saturation/lightness in HSL, then its contrast,
/// then temperature and tint as channel offsets.
fn apply_preset(rgb: [f64; 3], preset: FilterPreset) -> [f64; 3] {
    let v = preset.values();

    let (h, s, l) = rgb255_to_hsl(rgb[0], rgb[1], rgb[2]);
    let s = (s * (1.0 + v.saturation / 100.0)).clamp(0.0, 1.0);
    let l = (l * (1.0 + v.brightness / 100.0)).clamp(0.0, 1.0);
    let (r, g, b) = hsl_to_rgb255(h, s, l);

    let f = contrast_factor(v.contrast);
    let [mut r, mut g, mut b] = [r, g, b].map(|c| f * (c - 128.0) + 128.0);

    let temp = (v.temperature - 50.0) / 100.0;
    r += temp * 30.0;
    b -= temp * 30.0;

    let tint = v.tint / 100.0;
    g += tint * 20.0;
    b -= tint * 20.0;

    [r, g, b]
}

/// Stage 7: unsharp mask over RGB; alpha and the outer ring are kept.
fn sharpen(plane: &[f32], w: usize, h: usize, sharpness: f64) -> OpsResult<Vec<f32>> {
    let kernel = Kernel::unsharp((sharpness / 400.0) as f32);
    let mut out = convolve_interior(plane, w, h, CHANNELS, &kernel)?;
    for (dst, src) in out.chunks_exact_mut(CHANNELS).zip(plane.chunks_exact(CHANNELS)) {
        dst[3] = src[3];
    }
    Ok(out)
}

/// Stage 8: radial cosine falloff from the buffer center.
fn vignette(plane: &mut [f32], w: usize, h: usize, strength: f64) {
    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt();
    let amount = strength / 100.0 * FRAC_PI_2;

    for_each_row(plane, w * CHANNELS, |y, row| {
        let dy = y as f64 - cy;
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            let dx = x as f64 - cx;
            let ratio = (dx * dx + dy * dy).sqrt() / max_dist;
            let k = (ratio * amount).cos() as f32;
            px[0] *= k;
            px[1] *= k;
            px[2] *= k;
        }
    });
}
