//! Convolution, gradient and morphology kernels over float planes.
//!
//! The functions here operate on interleaved `f32` planes in `0..=255`
//! scale (`width * height * channels` values, row-major). Higher-level
//! engines ([`crate::tone`], [`crate::sketch`]) convert a
//! [`PixelBuffer`](pixkit_core::PixelBuffer) to a plane, chain these
//! stages, and quantize once at the end.
//!
//! # Kernels
//!
//! - [`Kernel::gaussian_1d`] - Normalized 1-D Gaussian for separable blur
//! - [`Kernel::unsharp`] - 3x3 unsharp mask with an 8-neighbor ring
//! - [`Kernel::sobel_x`] / [`Kernel::sobel_y`] - Gradient operators
//!
//! # Example
//!
//! ```rust
//! use pixkit_ops::filter::{gaussian_blur, Kernel};
//!
//! let src = vec![128.0f32; 16 * 16 * 3];
//! let blurred = gaussian_blur(&src, 16, 16, 3, 2).unwrap();
//! assert!(blurred.iter().all(|v| (v - 128.0).abs() < 1e-3));
//! ```

use crate::OpsResult;
use pixkit_core::Error;
use tracing::{debug, trace};

/// Convolution kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights, row-major.
    pub data: Vec<f32>,
    /// Kernel width (odd).
    pub width: usize,
    /// Kernel height (odd).
    pub height: usize,
}

impl Kernel {
    /// Creates a normalized 1-D Gaussian of `2 * radius + 1` taps.
    ///
    /// Sigma is `radius / 3`, so the kernel spans three standard
    /// deviations on each side.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_ops::filter::Kernel;
    ///
    /// let k = Kernel::gaussian_1d(3);
    /// assert_eq!((k.width, k.height), (7, 1));
    /// let sum: f32 = k.data.iter().sum();
    /// assert!((sum - 1.0).abs() < 1e-5);
    /// ```
    pub fn gaussian_1d(radius: usize) -> Self {
        let radius = radius.max(1);
        let sigma = radius as f32 / 3.0;
        let sigma2 = 2.0 * sigma * sigma;
        let half = radius as i32;

        let mut data: Vec<f32> = (-half..=half)
            .map(|i| (-((i * i) as f32) / sigma2).exp())
            .collect();
        let sum: f32 = data.iter().sum();
        for w in &mut data {
            *w /= sum;
        }

        Self {
            data,
            width: 2 * radius + 1,
            height: 1,
        }
    }

    /// Creates the 3x3 unsharp kernel `[-s,-s,-s; -s,1+8s,-s; -s,-s,-s]`.
    ///
    /// The weights always sum to 1, so flat regions are preserved.
    pub fn unsharp(s: f32) -> Self {
        let c = 1.0 + 8.0 * s;
        Self {
            data: vec![
                -s, -s, -s,
                -s, c, -s,
                -s, -s, -s,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Horizontal Sobel operator.
    pub fn sobel_x() -> Self {
        Self {
            data: vec![
                -1.0, 0.0, 1.0,
                -2.0, 0.0, 2.0,
                -1.0, 0.0, 1.0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Vertical Sobel operator.
    pub fn sobel_y() -> Self {
        Self {
            data: vec![
                -1.0, -2.0, -1.0,
                0.0, 0.0, 0.0,
                1.0, 2.0, 1.0,
            ],
            width: 3,
            height: 3,
        }
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

pub(crate) fn check_plane(src: &[f32], width: usize, height: usize, channels: usize) -> OpsResult<()> {
    let expected = width * height * channels;
    if width == 0 || height == 0 || src.len() != expected {
        return Err(Error::invalid_buffer(
            width as u32,
            height as u32,
            src.len(),
            format!("expected {} plane values", expected),
        )
        .into());
    }
    Ok(())
}

/// Separable Gaussian blur with clamp-to-edge sampling.
///
/// Runs a horizontal pass into a working copy, then a vertical pass.
/// Radius 0 is treated as 1.
pub fn gaussian_blur(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, radius, "gaussian_blur");
    check_plane(src, width, height, channels)?;

    let kernel = Kernel::gaussian_1d(radius);
    debug!(taps = kernel.width, "gaussian kernel");
    let temp = blur_pass(src, width, height, channels, &kernel, true);
    Ok(blur_pass(&temp, width, height, channels, &kernel, false))
}

/// One 1-D pass of a separable blur.
fn blur_pass(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
    horizontal: bool,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; src.len()];
    let r = kernel.radius().0 as isize;

    for y in 0..height {
        for x in 0..width {
            let dst_idx = (y * width + x) * channels;
            for c in 0..channels {
                let mut sum = 0.0f32;
                let mut weight = 0.0f32;
                for i in -r..=r {
                    let (sx, sy) = if horizontal {
                        ((x as isize + i).clamp(0, width as isize - 1) as usize, y)
                    } else {
                        (x, (y as isize + i).clamp(0, height as isize - 1) as usize)
                    };
                    let w = kernel.data[(i + r) as usize];
                    sum += src[(sy * width + sx) * channels + c] * w;
                    weight += w;
                }
                dst[dst_idx + c] = sum / weight;
            }
        }
    }

    dst
}

/// Applies a 3x3 kernel to interior pixels only.
///
/// Pixels in the first/last row and column are copied unconvolved.
pub fn convolve_interior(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, kernel_w = kernel.width, kernel_h = kernel.height, "convolve_interior");
    check_plane(src, width, height, channels)?;

    let mut dst = src.to_vec();
    let (rx, ry) = kernel.radius();
    if width <= 2 * rx || height <= 2 * ry {
        return Ok(dst);
    }

    for y in ry..height - ry {
        for x in rx..width - rx {
            let dst_idx = (y * width + x) * channels;
            for c in 0..channels {
                let mut sum = 0.0f32;
                for ky in 0..kernel.height {
                    for kx in 0..kernel.width {
                        let sx = x + kx - rx;
                        let sy = y + ky - ry;
                        sum += src[(sy * width + sx) * channels + c] * kernel.data[ky * kernel.width + kx];
                    }
                }
                dst[dst_idx + c] = sum;
            }
        }
    }

    Ok(dst)
}

/// Sobel gradient magnitude `sqrt(gx² + gy²)` of a single-channel plane.
///
/// Border rows and columns are 0.
pub fn sobel_magnitude(gray: &[f32], width: usize, height: usize) -> OpsResult<Vec<f32>> {
    trace!(width, height, "sobel_magnitude");
    check_plane(gray, width, height, 1)?;

    let mut dst = vec![0.0f32; gray.len()];
    if width < 3 || height < 3 {
        return Ok(dst);
    }

    let kx = Kernel::sobel_x();
    let ky = Kernel::sobel_y();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            for j in 0..3 {
                for i in 0..3 {
                    let v = gray[(y + j - 1) * width + (x + i - 1)];
                    gx += v * kx.data[j * 3 + i];
                    gy += v * ky.data[j * 3 + i];
                }
            }
            dst[y * width + x] = (gx * gx + gy * gy).sqrt();
        }
    }

    Ok(dst)
}

/// Morphological dilation - expands bright regions.
///
/// Uses a square structuring element of the given radius; the window is
/// clamped to the plane edges.
///
/// # Example
///
/// ```rust
/// use pixkit_ops::filter::dilate;
///
/// let mut src = vec![0.0f32; 9];
/// src[4] = 255.0;
/// let out = dilate(&src, 3, 3, 1, 1).unwrap();
/// assert!(out.iter().all(|&v| v == 255.0));
/// ```
pub fn dilate(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, radius, "dilate");
    check_plane(src, width, height, channels)?;

    let mut dst = vec![0.0f32; src.len()];
    let r = radius as isize;

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut val = f32::MIN;
                for ky in -r..=r {
                    let sy = (y as isize + ky).clamp(0, height as isize - 1) as usize;
                    for kx in -r..=r {
                        let sx = (x as isize + kx).clamp(0, width as isize - 1) as usize;
                        val = val.max(src[(sy * width + sx) * channels + c]);
                    }
                }
                dst[(y * width + x) * channels + c] = val;
            }
        }
    }

    Ok(dst)
}
