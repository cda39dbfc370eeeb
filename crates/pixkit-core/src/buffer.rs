//! The canonical in-memory raster.
//!
//! [`PixelBuffer`] stores a decoded image as row-major RGBA8, top-to-bottom:
//!
//! ```text
//! Memory: [R G B A R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! The length invariant `data.len() == width * height * 4` and the non-zero
//! dimension invariant are checked by every constructor, so a `PixelBuffer`
//! that exists is always well-formed. Channel values are `u8`, so the
//! `[0, 255]` clamp is enforced by the type; float intermediates go through
//! [`PixelBuffer::from_f32`], which clamps and rounds.
//!
//! # Usage
//!
//! ```rust
//! use pixkit_core::PixelBuffer;
//!
//! let mut img = PixelBuffer::new(8, 4).unwrap();
//! img.set_pixel(1, 2, [255, 0, 0, 255]);
//! assert_eq!(img.pixel(1, 2), [255, 0, 0, 255]);
//! assert_eq!(img.data().len(), 8 * 4 * 4);
//! ```
//!
//! # Used By
//!
//! - `pixkit-ops` - every transform consumes and produces buffers
//! - `pixkit-cli` - decode/encode boundary

use crate::{Error, Rect, Result};

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Owned RGBA8 raster with validated dimensions.
///
/// Buffers are value types: cloning copies the pixels, and transforms in
/// `pixkit-ops` never mutate their input.
///
/// # Example
///
/// ```rust
/// use pixkit_core::PixelBuffer;
///
/// let img = PixelBuffer::filled(3, 2, [10, 20, 30, 255]).unwrap();
/// assert_eq!(img.dimensions(), (3, 2));
/// assert_eq!(img.pixel(2, 1), [10, 20, 30, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a transparent-black buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuffer`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Creates a buffer filled with one RGBA value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuffer`] if either dimension is zero.
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Result<Self> {
        let len = byte_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&pixel);
        }
        Ok(Self { width, height, data })
    }

    /// Wraps existing RGBA8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuffer`] if `data.len() != width * height * 4`
    /// or either dimension is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_core::PixelBuffer;
    ///
    /// assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
    /// assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_err());
    /// assert!(PixelBuffer::from_raw(0, 2, vec![]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height).map_err(|_| {
            Error::invalid_buffer(width, height, data.len(), "dimensions must be non-zero")
        })?;
        if data.len() != expected {
            return Err(Error::invalid_buffer(
                width,
                height,
                data.len(),
                format!("expected {} bytes", expected),
            ));
        }
        Ok(Self { width, height, data })
    }

    /// Builds a buffer from float channel values in `0..=255` scale.
    ///
    /// Every value is rounded to the nearest integer and clamped to
    /// `[0, 255]`; NaN becomes 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::from_f32(1, 1, &[-12.0, 127.6, 300.0, 255.0]).unwrap();
    /// assert_eq!(img.pixel(0, 0), [0, 128, 255, 255]);
    /// ```
    pub fn from_f32(width: u32, height: u32, values: &[f32]) -> Result<Self> {
        let data = values.iter().map(|&v| quantize(v)).collect();
        Self::from_raw(width, height, data)
    }

    /// Returns the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns a rectangle covering the whole buffer.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns the raw RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw RGBA bytes mutably. The length cannot change.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Returns every channel as `f32` in `0..=255` scale.
    pub fn to_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&v| v as f32).collect()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        self.data[o..o + CHANNELS].copy_from_slice(&pixel);
    }

    /// Returns one row of RGBA bytes.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * CHANNELS;
        &self.data[start..start + self.width as usize * CHANNELS]
    }

    /// Returns one row of RGBA bytes mutably.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * CHANNELS;
        let end = start + self.width as usize * CHANNELS;
        &mut self.data[start..end]
    }

    /// Iterates over all pixels with their coordinates, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [u8; 4])> + '_ {
        let w = self.width as usize;
        self.data.chunks_exact(CHANNELS).enumerate().map(move |(i, px)| {
            ((i % w) as u32, (i / w) as u32, [px[0], px[1], px[2], px[3]])
        })
    }

    /// Copies a rectangular region into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if the region is empty or does not
    /// fit inside this buffer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_core::{PixelBuffer, Rect};
    ///
    /// let img = PixelBuffer::filled(8, 8, [1, 2, 3, 4]).unwrap();
    /// let sub = img.sub_image(Rect::new(2, 2, 3, 4)).unwrap();
    /// assert_eq!(sub.dimensions(), (3, 4));
    /// assert!(img.sub_image(Rect::new(6, 6, 4, 4)).is_err());
    /// ```
    pub fn sub_image(&self, region: Rect) -> Result<PixelBuffer> {
        if region.is_empty() || !self.bounds().contains_rect(&region) {
            return Err(Error::invalid_region(
                region.x,
                region.y,
                region.width,
                region.height,
                self.width,
                self.height,
            ));
        }
        let row_bytes = region.width as usize * CHANNELS;
        let mut data = Vec::with_capacity(row_bytes * region.height as usize);
        for y in region.y..region.y + region.height {
            let start = self.offset(region.x, y);
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Ok(PixelBuffer {
            width: region.width,
            height: region.height,
            data,
        })
    }

    /// Overwrites pixels with `src` placed at (x, y), clipped to this buffer.
    ///
    /// Offsets may be negative; the parts of `src` falling outside are
    /// dropped. No blending is performed.
    pub fn paste(&mut self, src: &PixelBuffer, x: i64, y: i64) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + src.width as i64).min(self.width as i64);
        let y1 = (y + src.height as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let span = (x1 - x0) as usize * CHANNELS;
        for dy in y0..y1 {
            let sy = (dy - y) as u32;
            let sx = (x0 - x) as u32;
            let s = src.offset(sx, sy);
            let d = self.offset(x0 as u32, dy as u32);
            self.data[d..d + span].copy_from_slice(&src.data[s..s + span]);
        }
    }
}

/// Rejects a buffer whose byte size would exceed `max_bytes`.
///
/// The engine itself has no size ceiling; callers use this for admission
/// control before any transform allocates a full-size output.
///
/// # Example
///
/// ```rust
/// use pixkit_core::check_budget;
///
/// assert!(check_budget(100, 100, 40_000).is_ok());
/// assert!(check_budget(100, 101, 40_000).is_err());
/// ```
pub fn check_budget(width: u32, height: u32, max_bytes: u64) -> Result<()> {
    let bytes = width as u64 * height as u64 * CHANNELS as u64;
    if bytes > max_bytes {
        return Err(Error::invalid_buffer(
            width,
            height,
            0,
            format!("{} bytes exceeds budget of {} bytes", bytes, max_bytes),
        ));
    }
    Ok(())
}

fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_buffer(width, height, 0, "dimensions must be non-zero"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_buffer(width, height, 0, "dimensions overflow"))
}

#[inline]
fn quantize(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let img = PixelBuffer::new(3, 3).unwrap();
        assert!(img.data().iter().all(|&v| v == 0));
        assert_eq!(img.pixel_count(), 9);
    }

    #[test]
    fn test_filled_sets_every_pixel() {
        let img = PixelBuffer::filled(5, 2, [1, 2, 3, 4]).unwrap();
        assert_eq!(img.data().len(), 40);
        assert!(img.pixels().all(|(_, _, p)| p == [1, 2, 3, 4]));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(PixelBuffer::new(0, 5).unwrap_err().is_buffer_error());
        assert!(PixelBuffer::filled(5, 0, [0; 4]).is_err());
        assert!(PixelBuffer::from_raw(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_from_raw_length_mismatch() {
        let err = PixelBuffer::from_raw(2, 3, vec![0; 23]).unwrap_err();
        assert!(err.to_string().contains("expected 24 bytes"));
    }

    #[test]
    fn test_from_f32_clamps_and_rounds() {
        let img = PixelBuffer::from_f32(2, 1, &[0.4, 0.5, 254.6, 1000.0, -1.0, f32::NAN, 12.49, 12.5])
            .unwrap();
        assert_eq!(img.pixel(0, 0), [0, 1, 255, 255]);
        assert_eq!(img.pixel(1, 0), [0, 0, 12, 13]);
    }

    #[test]
    fn test_pixels_iterator_row_major() {
        let mut img = PixelBuffer::new(2, 2).unwrap();
        img.set_pixel(1, 0, [9, 9, 9, 9]);
        let coords: Vec<(u32, u32)> = img.pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(img.pixels().nth(1).map(|p| p.2), Some([9, 9, 9, 9]));
    }

    #[test]
    fn test_sub_image_contents() {
        let mut img = PixelBuffer::new(4, 4).unwrap();
        img.set_pixel(2, 1, [1, 2, 3, 4]);
        let sub = img.sub_image(Rect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(sub.pixel(1, 0), [1, 2, 3, 4]);
        assert_eq!(sub.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_paste_clips_negative_offsets() {
        let mut dst = PixelBuffer::new(3, 3).unwrap();
        let src = PixelBuffer::filled(2, 2, [7, 7, 7, 255]).unwrap();
        dst.paste(&src, -1, -1);
        assert_eq!(dst.pixel(0, 0), [7, 7, 7, 255]);
        assert_eq!(dst.pixel(1, 0), [0, 0, 0, 0]);
        assert_eq!(dst.pixel(0, 1), [0, 0, 0, 0]);

        dst.paste(&src, 2, 2);
        assert_eq!(dst.pixel(2, 2), [7, 7, 7, 255]);
        dst.paste(&src, 5, 5);
        assert_eq!(dst.get_pixel(2, 2), Some([7, 7, 7, 255]));
        assert_eq!(dst.get_pixel(3, 0), None);
    }

    #[test]
    fn test_check_budget() {
        assert!(check_budget(1, 1, 4).is_ok());
        assert!(check_budget(1, 2, 4).unwrap_err().is_buffer_error());
    }
}
