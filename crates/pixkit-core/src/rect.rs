//! Pixel-aligned rectangles: crop regions, grid cells, blit targets.
//!
//! Origin is the top-left corner; `x + width` and `y + height` are
//! exclusive edges.
//!
//! ```rust
//! use pixkit_core::Rect;
//!
//! let square = Rect::centered_square(100, 60);
//! assert_eq!(square, Rect::new(20, 0, 60, 60));
//! assert!(Rect::from_size(100, 60).contains_rect(&square));
//! ```

use crate::{Error, Result};
use std::str::FromStr;

/// Axis-aligned pixel region. Zero width or height means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Columns covered.
    pub width: u32,
    /// Rows covered.
    pub height: u32,
}

impl Rect {
    /// Region at `(x, y)` spanning `width x height`.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Whole-buffer region of a `width x height` raster.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Largest square centered in a `width x height` raster.
    ///
    /// Odd leftovers go to the right/bottom: the offset is floored.
    pub const fn centered_square(width: u32, height: u32) -> Self {
        let side = if width < height { width } else { height };
        Self::new((width - side) / 2, (height - side) / 2, side, side)
    }

    /// Exclusive right edge, widened so it never wraps.
    #[inline]
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge, widened so it never wraps.
    #[inline]
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// `true` for a zero-area region.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `true` when `other` lies entirely within `self`.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x && other.y >= self.y && other.right() <= self.right() && other.bottom() <= self.bottom()
    }
}

impl FromStr for Rect {
    type Err = Error;

    /// Parses `x,y,width,height`.
    ///
    /// ```rust
    /// use pixkit_core::Rect;
    ///
    /// let r: Rect = "4,8,16,32".parse().unwrap();
    /// assert_eq!(r, Rect::new(4, 8, 16, 32));
    /// assert!("4,8,16".parse::<Rect>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::parse(format!("rect '{}': {}", s, e)))?;
        match parts.as_slice() {
            [x, y, w, h] => Ok(Rect::new(*x, *y, *w, *h)),
            _ => Err(Error::parse(format!("rect '{}': expected x,y,width,height", s))),
        }
    }
}
