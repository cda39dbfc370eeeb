//! Resampling.
//!
//! Separable two-pass resize (horizontal, then vertical) with a choice of
//! reconstruction filter. Each pass precomputes, for every output column or
//! row, the normalized list of source taps it reads; when downscaling the
//! filter support is widened by the scale factor so every source pixel
//! contributes.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - No interpolation (blocky)
//! - [`Filter::Bilinear`] - Triangle filter, the default
//! - [`Filter::Bicubic`] - Mitchell-Netravali, B = C = 1/3
//! - [`Filter::Lanczos3`] - Windowed sinc, sharpest downscale
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::PixelBuffer;
//! use pixkit_ops::resize::{fit_dimensions, resize, Filter, ResizeSpec};
//!
//! let img = PixelBuffer::filled(1920, 1080, [10, 20, 30, 255]).unwrap();
//! let spec = ResizeSpec::fit(640, 640);
//! assert_eq!(fit_dimensions(1920, 1080, &spec).unwrap(), (640, 360));
//!
//! let small = resize(&img, 64, 36, Filter::Bilinear).unwrap();
//! assert_eq!(small.pixel(10, 10), [10, 20, 30, 255]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use pixkit_core::{CHANNELS, Error, PixelBuffer};
use tracing::{debug, trace};

/// Reconstruction filter for [`resize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Filter {
    /// Nearest neighbor.
    Nearest,
    /// Linear interpolation.
    #[default]
    Bilinear,
    /// Cubic interpolation.
    Bicubic,
    /// Lanczos, three lobes.
    Lanczos3,
}

impl Filter {
    /// Support radius at unit scale.
    #[inline]
    pub fn support(self) -> f64 {
        match self {
            Self::Nearest => 0.5,
            Self::Bilinear => 1.0,
            Self::Bicubic => 2.0,
            Self::Lanczos3 => 3.0,
        }
    }

    /// Kernel value at distance `x` (in source pixels at unit scale).
    #[inline]
    pub fn weight(self, x: f64) -> f64 {
        let ax = x.abs();
        match self {
            Self::Nearest => {
                if ax <= 0.5 { 1.0 } else { 0.0 }
            }
            Self::Bilinear => (1.0 - ax).max(0.0),
            Self::Bicubic => mitchell(ax),
            Self::Lanczos3 => lanczos(ax, 3.0),
        }
    }

    /// Returns the canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::Bicubic => "bicubic",
            Self::Lanczos3 => "lanczos3",
        }
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" | "linear" => Ok(Self::Bilinear),
            "bicubic" | "cubic" => Ok(Self::Bicubic),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(Error::parse(format!("unknown resize filter '{}'", other))),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn mitchell(ax: f64) -> f64 {
    const B: f64 = 1.0 / 3.0;
    const C: f64 = 1.0 / 3.0;
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax.powi(3) + (-18.0 + 12.0 * B + 6.0 * C) * ax.powi(2)
            + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax.powi(3)
            + (6.0 * B + 30.0 * C) * ax.powi(2)
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

fn lanczos(ax: f64, a: f64) -> f64 {
    if ax < 1e-8 {
        return 1.0;
    }
    if ax >= a {
        return 0.0;
    }
    let px = std::f64::consts::PI * ax;
    (px.sin() / px) * ((px / a).sin() / (px / a))
}

/// Target size for a resize step.
///
/// With `keep_aspect` the source is scaled uniformly to fit inside
/// `width x height`; otherwise it is stretched to exactly that size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeSpec {
    /// Target (or bounding) width.
    pub width: u32,
    /// Target (or bounding) height.
    pub height: u32,
    /// Preserve the source aspect ratio.
    #[cfg_attr(feature = "serde", serde(default, alias = "maintain_aspect_ratio"))]
    pub keep_aspect: bool,
    /// Reconstruction filter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter: Filter,
}

impl ResizeSpec {
    /// Stretch to exactly `width x height`.
    pub const fn exact(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            keep_aspect: false,
            filter: Filter::Bilinear,
        }
    }

    /// Fit inside `width x height`, preserving aspect.
    pub const fn fit(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            keep_aspect: true,
            filter: Filter::Bilinear,
        }
    }

    /// Replaces the filter.
    pub const fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}

/// Output dimensions of `spec` applied to a `src_w x src_h` source.
///
/// The aspect-preserving case uses `ratio = min(w / src_w, h / src_h)` and
/// truncates the scaled sizes.
///
/// # Errors
///
/// Returns [`OpsError::InvalidGeometry`] if either resulting dimension is 0.
pub fn fit_dimensions(src_w: u32, src_h: u32, spec: &ResizeSpec) -> OpsResult<(u32, u32)> {
    let (w, h) = if spec.keep_aspect && src_w > 0 && src_h > 0 {
        let ratio = (spec.width as f64 / src_w as f64).min(spec.height as f64 / src_h as f64);
        (
            (src_w as f64 * ratio).floor() as u32,
            (src_h as f64 * ratio).floor() as u32,
        )
    } else {
        (spec.width, spec.height)
    };

    if w == 0 || h == 0 {
        return Err(OpsError::geometry(format!(
            "resize of {}x{} to {}x{} yields {}x{}",
            src_w, src_h, spec.width, spec.height, w, h
        )));
    }
    Ok((w, h))
}

/// Resizes `src` according to `spec`.
pub fn resize_to(src: &PixelBuffer, spec: &ResizeSpec) -> OpsResult<PixelBuffer> {
    let (w, h) = fit_dimensions(src.width(), src.height(), spec)?;
    resize(src, w, h, spec.filter)
}

/// Resizes `src` to `dst_w x dst_h`.
///
/// Same-size requests return an exact copy.
///
/// # Errors
///
/// Returns [`OpsError::InvalidGeometry`] if either target dimension is 0.
pub fn resize(src: &PixelBuffer, dst_w: u32, dst_h: u32, filter: Filter) -> OpsResult<PixelBuffer> {
    trace!(
        src_w = src.width(),
        src_h = src.height(),
        dst_w,
        dst_h,
        %filter,
        "resize"
    );
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::geometry(format!(
            "resize target {}x{} has zero area",
            dst_w, dst_h
        )));
    }
    if (dst_w, dst_h) == src.dimensions() {
        return Ok(src.clone());
    }

    let (sw, sh) = (src.width() as usize, src.height() as usize);
    let (dw, dh) = (dst_w as usize, dst_h as usize);
    let plane = src.to_f32();

    // Horizontal: sw x sh -> dw x sh
    let cols = taps(sw, dw, filter);
    let mut wide = vec![0.0f32; dw * sh * CHANNELS];
    for_each_row(&mut wide, dw * CHANNELS, |y, row| {
        let src_row = &plane[y * sw * CHANNELS..(y + 1) * sw * CHANNELS];
        for (x, list) in cols.iter().enumerate() {
            let mut acc = [0.0f32; CHANNELS];
            for &(sx, w) in list {
                let s = &src_row[sx * CHANNELS..(sx + 1) * CHANNELS];
                for c in 0..CHANNELS {
                    acc[c] += s[c] * w;
                }
            }
            row[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&acc);
        }
    });

    // Vertical: dw x sh -> dw x dh
    let rows = taps(sh, dh, filter);
    let mut out = vec![0.0f32; dw * dh * CHANNELS];
    for_each_row(&mut out, dw * CHANNELS, |y, row| {
        for &(sy, w) in &rows[y] {
            let src_row = &wide[sy * dw * CHANNELS..(sy + 1) * dw * CHANNELS];
            for (d, s) in row.iter_mut().zip(src_row) {
                *d += s * w;
            }
        }
    });

    Ok(PixelBuffer::from_f32(dst_w, dst_h, &out)?)
}

/// Per-output-index source taps with weights summing to 1.
fn taps(src_len: usize, dst_len: usize, filter: Filter) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;
    let stretch = scale.max(1.0);
    let support = filter.support() * stretch;
    debug!(src_len, dst_len, scale, support, "resize taps");

    (0..dst_len)
        .map(|i| {
            let center = (i as f64 + 0.5) * scale - 0.5;
            let lo = (center - support).floor().max(0.0) as usize;
            let hi = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);

            let mut list: Vec<(usize, f64)> = (lo..=hi)
                .map(|s| (s, filter.weight((s as f64 - center) / stretch)))
                .filter(|&(_, w)| w != 0.0)
                .collect();
            let sum: f64 = list.iter().map(|&(_, w)| w).sum();
            if sum.abs() < 1e-12 {
                // Nearest can land exactly between taps.
                let s = center.round().clamp(0.0, (src_len - 1) as f64) as usize;
                list = vec![(s, 1.0)];
            } else {
                for t in &mut list {
                    t.1 /= sum;
                }
            }
            list.into_iter().map(|(s, w)| (s, w as f32)).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_weights() {
        assert_eq!(Filter::Nearest.weight(0.0), 1.0);
        assert_eq!(Filter::Nearest.weight(0.6), 0.0);
        assert_eq!(Filter::Bilinear.weight(0.5), 0.5);
        assert!((Filter::Lanczos3.weight(0.0) - 1.0).abs() < 1e-9);
        assert_eq!(Filter::Bicubic.weight(2.5), 0.0);
    }

    #[test]
    fn test_fit_dimensions_truncates() {
        assert_eq!(fit_dimensions(1920, 1080, &ResizeSpec::fit(640, 640)).unwrap(), (640, 360));
        assert_eq!(fit_dimensions(1080, 1920, &ResizeSpec::fit(640, 640)).unwrap(), (360, 640));
        // 100 * (50/3) = 33.33 -> 33
        assert_eq!(fit_dimensions(3, 2, &ResizeSpec::fit(50, 50)).unwrap(), (50, 33));
        assert_eq!(fit_dimensions(320, 240, &ResizeSpec::exact(10, 90)).unwrap(), (10, 90));
    }

    #[test]
    fn test_fit_to_zero_is_geometry_error() {
        let err = fit_dimensions(1000, 10, &ResizeSpec::fit(50, 50)).unwrap_err();
        assert!(err.is_geometry_error());
        assert!(fit_dimensions(10, 10, &ResizeSpec::exact(0, 5)).is_err());
    }

    #[test]
    fn test_constant_stays_constant() {
        let img = PixelBuffer::filled(7, 5, [90, 120, 200, 255]).unwrap();
        for filter in [Filter::Nearest, Filter::Bilinear, Filter::Bicubic, Filter::Lanczos3] {
            let up = resize(&img, 15, 11, filter).unwrap();
            assert_eq!(up.dimensions(), (15, 11));
            assert!(up.pixels().all(|(_, _, p)| p == [90, 120, 200, 255]), "{filter}");
            let down = resize(&img, 3, 2, filter).unwrap();
            assert!(down.pixels().all(|(_, _, p)| p == [90, 120, 200, 255]), "{filter}");
        }
    }

    #[test]
    fn test_same_size_is_copy() {
        let mut img = PixelBuffer::new(4, 4).unwrap();
        img.set_pixel(1, 2, [1, 2, 3, 4]);
        assert_eq!(resize(&img, 4, 4, Filter::Lanczos3).unwrap(), img);
    }

    #[test]
    fn test_nearest_upscale_duplicates() {
        let mut img = PixelBuffer::new(2, 1).unwrap();
        img.set_pixel(0, 0, [255, 0, 0, 255]);
        img.set_pixel(1, 0, [0, 0, 255, 255]);
        let out = resize(&img, 4, 1, Filter::Nearest).unwrap();
        assert_eq!(out.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(out.pixel(3, 0), [0, 0, 255, 255]);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("Lanczos".parse::<Filter>().unwrap(), Filter::Lanczos3);
        assert!("box".parse::<Filter>().is_err());
    }
}
