//! Line-art extraction.
//!
//! Three stages over float planes, quantized once at the end:
//!
//! 1. separable Gaussian blur of RGB, radius `max(1, floor(smoothing / 10))`
//! 2. Sobel magnitude of the channel average, thresholded at
//!    `threshold / 100 * 255` into 0 or 255 (border pixels stay 0)
//! 3. square dilation of the edge mask, radius `max(1, floor(thickness / 100 * 3))`
//!
//! The mask is replicated into R, G and B with opaque alpha, so edges are
//! white on black.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::PixelBuffer;
//! use pixkit_ops::sketch::{extract_sketch, SketchParams};
//!
//! let mut img = PixelBuffer::filled(16, 16, [0, 0, 0, 255]).unwrap();
//! for y in 0..16 {
//!     for x in 8..16 {
//!         img.set_pixel(x, y, [255, 255, 255, 255]);
//!     }
//! }
//! let lines = extract_sketch(&img, 30.0, 50.0, 10.0).unwrap();
//! assert_eq!(lines.pixel(8, 8), [255, 255, 255, 255]);
//! assert_eq!(lines.pixel(1, 8), [0, 0, 0, 255]);
//! # let _ = SketchParams::default();
//! ```

use crate::filter::{dilate, gaussian_blur, sobel_magnitude};
use crate::{OpsResult, clamp_or};
use pixkit_core::{CHANNELS, PixelBuffer};
use tracing::{debug, trace};

/// Line-art settings, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SketchParams {
    /// Edge sensitivity; higher keeps fewer edges.
    pub threshold: f64,
    /// Line width.
    pub thickness: f64,
    /// Pre-blur strength.
    pub smoothing: f64,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            threshold: 30.0,
            thickness: 50.0,
            smoothing: 50.0,
        }
    }
}

impl SketchParams {
    /// Returns a copy with every field forced into `0..=100`.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            threshold: clamp_or(self.threshold, 0.0, 100.0, d.threshold),
            thickness: clamp_or(self.thickness, 0.0, 100.0, d.thickness),
            smoothing: clamp_or(self.smoothing, 0.0, 100.0, d.smoothing),
        }
    }

    /// Blur radius in pixels.
    pub fn blur_radius(&self) -> usize {
        ((self.smoothing / 10.0).floor() as usize).max(1)
    }

    /// Dilation radius in pixels.
    pub fn dilate_radius(&self) -> usize {
        ((self.thickness / 100.0 * 3.0).floor() as usize).max(1)
    }

    /// Gradient magnitude an edge must exceed.
    pub fn edge_level(&self) -> f32 {
        (self.threshold / 100.0 * 255.0) as f32
    }

    /// Runs [`extract_sketch`] with these settings.
    pub fn apply(&self, src: &PixelBuffer) -> OpsResult<PixelBuffer> {
        extract_sketch(src, self.threshold, self.thickness, self.smoothing)
    }
}

/// Converts `src` into binary line art.
///
/// Parameters outside `0..=100` are clamped.
pub fn extract_sketch(
    src: &PixelBuffer,
    threshold: f64,
    thickness: f64,
    smoothing: f64,
) -> OpsResult<PixelBuffer> {
    let params = SketchParams { threshold, thickness, smoothing }.clamped();
    let (w, h) = (src.width() as usize, src.height() as usize);
    trace!(width = w, height = h, ?params, "extract_sketch");

    let blur_radius = params.blur_radius();
    let dilate_radius = params.dilate_radius();
    let level = params.edge_level();
    debug!(blur_radius, dilate_radius, level, "sketch radii");

    let rgb: Vec<f32> = src
        .data()
        .chunks_exact(CHANNELS)
        .flat_map(|px| [px[0] as f32, px[1] as f32, px[2] as f32])
        .collect();
    let blurred = gaussian_blur(&rgb, w, h, 3, blur_radius)?;

    let gray: Vec<f32> = blurred
        .chunks_exact(3)
        .map(|px| (px[0] + px[1] + px[2]) / 3.0)
        .collect();
    let edges: Vec<f32> = sobel_magnitude(&gray, w, h)?
        .into_iter()
        .map(|m| if m > level { 255.0 } else { 0.0 })
        .collect();
    let mask = dilate(&edges, w, h, 1, dilate_radius)?;

    let out: Vec<f32> = mask.iter().flat_map(|&v| [v, v, v, 255.0]).collect();
    Ok(PixelBuffer::from_f32(src.width(), src.height(), &out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radii() {
        let p = SketchParams { threshold: 0.0, thickness: 0.0, smoothing: 0.0 };
        assert_eq!(p.blur_radius(), 1);
        assert_eq!(p.dilate_radius(), 1);
        let p = SketchParams { threshold: 50.0, thickness: 100.0, smoothing: 95.0 };
        assert_eq!(p.blur_radius(), 9);
        assert_eq!(p.dilate_radius(), 3);
        assert!((p.edge_level() - 127.5).abs() < 1e-4);
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let img = PixelBuffer::filled(4, 4, [255, 255, 255, 255]).unwrap();
        for t in [0.0, 30.0, 100.0] {
            let out = extract_sketch(&img, t, 50.0, 50.0).unwrap();
            assert!(out.pixels().all(|(_, _, p)| p == [0, 0, 0, 255]));
        }
    }

    #[test]
    fn test_output_is_binary_and_opaque() {
        let mut img = PixelBuffer::new(12, 12).unwrap();
        for (i, px) in img.data_mut().chunks_exact_mut(4).enumerate() {
            let v = ((i * 37) % 256) as u8;
            px.copy_from_slice(&[v, 255 - v, v / 2, 10]);
        }
        let out = extract_sketch(&img, 10.0, 0.0, 0.0).unwrap();
        for (_, _, p) in out.pixels() {
            assert!(p[0] == 0 || p[0] == 255);
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
            assert_eq!(p[3], 255);
        }
    }

    #[test]
    fn test_max_threshold_suppresses_soft_edge() {
        let mut img = PixelBuffer::filled(10, 10, [100, 100, 100, 255]).unwrap();
        for y in 0..10 {
            for x in 5..10 {
                img.set_pixel(x, y, [140, 140, 140, 255]);
            }
        }
        let out = extract_sketch(&img, 100.0, 0.0, 0.0).unwrap();
        assert!(out.pixels().all(|(_, _, p)| p[0] == 0));
        let out = extract_sketch(&img, 5.0, 0.0, 0.0).unwrap();
        assert_eq!(out.pixel(5, 5)[0], 255);
    }

    #[test]
    fn test_tiny_buffer() {
        let img = PixelBuffer::filled(1, 1, [9, 9, 9, 9]).unwrap();
        assert_eq!(extract_sketch(&img, 0.0, 0.0, 0.0).unwrap().pixel(0, 0), [0, 0, 0, 255]);
    }
}
