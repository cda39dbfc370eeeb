//! Orientation and cropping transforms.
//!
//! # Operations
//!
//! - [`flip_horizontal`] / [`flip_vertical`] - Exact mirrors
//! - [`rotate_flip`] - Arbitrary-angle rotation plus flips around the center
//! - [`crop`] - Rectangular region, transparent where it leaves the source
//!
//! Rotation keeps the buffer's dimensions, like drawing onto a same-sized
//! canvas after a centered rotate: corners that rotate out are lost and
//! uncovered areas become transparent black.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Rect};
//! use pixkit_ops::transform::{crop, flip_horizontal};
//!
//! let mut img = PixelBuffer::new(4, 4).unwrap();
//! img.set_pixel(0, 0, [255, 0, 0, 255]);
//!
//! let flipped = flip_horizontal(&img);
//! assert_eq!(flipped.pixel(3, 0), [255, 0, 0, 255]);
//!
//! let cropped = crop(&img, Rect::new(0, 0, 2, 2)).unwrap();
//! assert_eq!(cropped.dimensions(), (2, 2));
//! ```

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use pixkit_core::{CHANNELS, PixelBuffer, Rect};
use tracing::trace;

/// Mirrors left-right.
pub fn flip_horizontal(src: &PixelBuffer) -> PixelBuffer {
    let mut dst = src.clone();
    let row_len = src.width() as usize * CHANNELS;
    for_each_row(dst.data_mut(), row_len, |_, row| {
        let w = row.len() / CHANNELS;
        for x in 0..w / 2 {
            let (a, b) = (x * CHANNELS, (w - 1 - x) * CHANNELS);
            for c in 0..CHANNELS {
                row.swap(a + c, b + c);
            }
        }
    });
    dst
}

/// Mirrors top-bottom.
pub fn flip_vertical(src: &PixelBuffer) -> PixelBuffer {
    let mut dst = src.clone();
    let h = src.height();
    for y in 0..h {
        dst.row_mut(y).copy_from_slice(src.row(h - 1 - y));
    }
    dst
}

/// Rotates by `degrees` (clockwise, any angle) and optionally mirrors,
/// both about the buffer center.
///
/// Output has the input's dimensions. Each output pixel is inverse-mapped
/// into the source and sampled bilinearly; samples landing outside the
/// source are `(0, 0, 0, 0)`. A zero angle reduces to exact flips.
///
/// # Example
///
/// ```rust
/// use pixkit_core::PixelBuffer;
/// use pixkit_ops::transform::rotate_flip;
///
/// let mut img = PixelBuffer::filled(3, 3, [0, 0, 0, 255]).unwrap();
/// img.set_pixel(0, 0, [255, 255, 255, 255]);
///
/// // Top-left moves to top-right after a quarter turn.
/// let out = rotate_flip(&img, 90.0, false, false);
/// assert_eq!(out.pixel(2, 0), [255, 255, 255, 255]);
/// ```
pub fn rotate_flip(src: &PixelBuffer, degrees: f64, flip_h: bool, flip_v: bool) -> PixelBuffer {
    let degrees = if degrees.is_finite() { degrees.rem_euclid(360.0) } else { 0.0 };
    trace!(width = src.width(), height = src.height(), degrees, flip_h, flip_v, "rotate_flip");

    if degrees == 0.0 {
        return match (flip_h, flip_v) {
            (false, false) => src.clone(),
            (true, false) => flip_horizontal(src),
            (false, true) => flip_vertical(src),
            (true, true) => flip_vertical(&flip_horizontal(src)),
        };
    }

    let (w, h) = (src.width() as usize, src.height() as usize);
    let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
    let (sin, cos) = degrees.to_radians().sin_cos();
    let sx_sign = if flip_h { -1.0 } else { 1.0 };
    let sy_sign = if flip_v { -1.0 } else { 1.0 };

    let mut dst = src.clone();
    for_each_row(dst.data_mut(), w * CHANNELS, |y, row| {
        let dy = y as f64 + 0.5 - cy;
        for x in 0..w {
            let dx = x as f64 + 0.5 - cx;
            // Inverse of translate(c) . rotate(a) . scale(flip) . translate(-c).
            let u = (cos * dx + sin * dy) * sx_sign;
            let v = (-sin * dx + cos * dy) * sy_sign;
            let px = sample_bilinear(src, u + cx - 0.5, v + cy - 0.5);
            row[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&px);
        }
    });
    dst
}

/// Samples at fractional pixel-index coordinates.
///
/// Coordinates within half a pixel of the source edge are covered (with
/// edge clamping); anything further out is transparent.
fn sample_bilinear(src: &PixelBuffer, fx: f64, fy: f64) -> [u8; 4] {
    let (w, h) = (src.width() as f64, src.height() as f64);
    if fx < -0.5 || fy < -0.5 || fx >= w - 0.5 || fy >= h - 0.5 {
        return [0; 4];
    }

    let fx = fx.clamp(0.0, w - 1.0);
    let fy = fy.clamp(0.0, h - 1.0);
    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(src.width() - 1);
    let y1 = (y0 + 1).min(src.height() - 1);
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x1, y0);
    let p01 = src.pixel(x0, y1);
    let p11 = src.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..CHANNELS {
        let top = p00[c] as f64 * (1.0 - tx) + p10[c] as f64 * tx;
        let bottom = p01[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Cuts `region` out of `src`.
///
/// The region may extend past the source; those pixels are transparent.
///
/// # Errors
///
/// Returns [`OpsError::InvalidGeometry`] for a zero-area region.
pub fn crop(src: &PixelBuffer, region: Rect) -> OpsResult<PixelBuffer> {
    trace!(x = region.x, y = region.y, w = region.width, h = region.height, "crop");
    if region.is_empty() {
        return Err(OpsError::geometry(format!(
            "crop region {}x{} has zero area",
            region.width, region.height
        )));
    }
    if src.bounds().contains_rect(&region) {
        return Ok(src.sub_image(region)?);
    }

    let mut dst = PixelBuffer::new(region.width, region.height)?;
    dst.paste(src, -(region.x as i64), -(region.y as i64));
    Ok(dst)
}
