//! Multi-image composition.
//!
//! [`compose`] places a sequence of buffers onto one canvas sized to their
//! bounding box plus padding. Items are drawn in order with source-over
//! blending, so opaque pixels simply overwrite and the source's own alpha
//! is the only transparency. With a positive gap, faint 1px separators
//! (5% black) are drawn through the middle of each inter-item gap.
//!
//! Positions either come from the caller, typically via [`stack_layout`]
//! which handles cross-axis alignment, or are recomputed by an
//! [`AutoLayout`] that spaces items uniformly along one axis.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Rgb};
//! use pixkit_ops::composite::{compose, stack_layout, Align, CompositionItem, CompositionOptions, Direction};
//!
//! let a = PixelBuffer::filled(40, 30, [255, 0, 0, 255]).unwrap();
//! let b = PixelBuffer::filled(20, 10, [0, 0, 255, 255]).unwrap();
//!
//! let sizes = [a.dimensions(), b.dimensions()];
//! let positions = stack_layout(&sizes, Direction::Horizontal, Align::Center, 5);
//! let items: Vec<_> = [a, b]
//!     .into_iter()
//!     .zip(positions)
//!     .map(|(buffer, position)| CompositionItem { buffer, position })
//!     .collect();
//!
//! let options = CompositionOptions { gap: 5, padding: 2, ..Default::default() };
//! let sheet = compose(&items, &options).unwrap();
//! assert_eq!(sheet.dimensions(), (40 + 5 + 20 + 4, 30 + 4));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::resize::{Filter, resize};
use crate::{OpsError, OpsResult};
use pixkit_core::{CHANNELS, Error, PixelBuffer, Rgb};
use tracing::{debug, trace};

/// Separator lines keep this fraction of the underlying color.
const SEPARATOR_KEEP: f32 = 0.95;

/// Top-left placement of an item, before padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Stacking axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Direction {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// Placement along the axis perpendicular to stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Align {
    /// Top or left edge.
    #[default]
    Start,
    /// Centered, rounded down.
    Center,
    /// Bottom or right edge.
    End,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            other => Err(Error::parse(format!("unknown direction '{}'", other))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

impl FromStr for Align {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "center" | "middle" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => Err(Error::parse(format!("unknown alignment '{}'", other))),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        })
    }
}

/// One buffer and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionItem {
    /// Pixels to draw.
    pub buffer: PixelBuffer,
    /// Top-left offset inside the padded area.
    pub position: Position,
}

impl CompositionItem {
    /// Creates an item at `(x, y)`.
    pub fn new(buffer: PixelBuffer, x: i32, y: i32) -> Self {
        Self {
            buffer,
            position: Position::new(x, y),
        }
    }
}

/// Uniform spacing that replaces caller positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoLayout {
    /// Stacking axis.
    pub direction: Direction,
    /// Slot size. Defaults to the largest item width and height; when set,
    /// every item is resampled to exactly this size.
    pub fixed_size: Option<(u32, u32)>,
}

/// Canvas settings for [`compose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompositionOptions {
    /// Spacing between items; also enables separators when positive.
    pub gap: u32,
    /// Border added on every side of the bounding box.
    pub padding: u32,
    /// Canvas fill color (opaque).
    #[cfg_attr(feature = "serde", serde(alias = "background_color"))]
    pub background: Rgb,
    /// Recompute positions instead of using the items' own.
    #[cfg_attr(feature = "serde", serde(alias = "auto_arrange"))]
    pub auto_layout: Option<AutoLayout>,
}

impl Default for CompositionOptions {
    fn default() -> Self {
        Self {
            gap: 0,
            padding: 0,
            background: Rgb::WHITE,
            auto_layout: None,
        }
    }
}

/// Positions for items of `sizes` stacked along `direction`.
///
/// Along the stacking axis offsets accumulate `size + gap`. Across it,
/// each item sits at the start, the floored center or the end of the
/// largest cross-axis extent.
///
/// ```rust
/// use pixkit_ops::composite::{stack_layout, Align, Direction, Position};
///
/// let pos = stack_layout(&[(10, 20), (30, 5)], Direction::Vertical, Align::End, 4);
/// assert_eq!(pos, vec![Position::new(20, 0), Position::new(0, 24)]);
/// ```
pub fn stack_layout(
    sizes: &[(u32, u32)],
    direction: Direction,
    align: Align,
    gap: u32,
) -> Vec<Position> {
    let cross = |&(w, h): &(u32, u32)| match direction {
        Direction::Horizontal => h,
        Direction::Vertical => w,
    };
    let extent = sizes.iter().map(cross).max().unwrap_or(0) as i64;

    let mut cursor = 0i64;
    sizes
        .iter()
        .map(|size| {
            let c = cross(size) as i64;
            let off = match align {
                Align::Start => 0,
                Align::Center => (extent - c).div_euclid(2),
                Align::End => extent - c,
            };
            let along = cursor;
            cursor += match direction {
                Direction::Horizontal => size.0 as i64,
                Direction::Vertical => size.1 as i64,
            } + gap as i64;
            match direction {
                Direction::Horizontal => Position::new(saturate(along), saturate(off)),
                Direction::Vertical => Position::new(saturate(off), saturate(along)),
            }
        })
        .collect()
}

#[inline]
fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// An item resolved to its final position and pixels.
struct Placement<'a> {
    x: i64,
    y: i64,
    buffer: Cow<'a, PixelBuffer>,
}

impl Placement<'_> {
    fn right(&self) -> i64 {
        self.x + self.buffer.width() as i64
    }

    fn bottom(&self) -> i64 {
        self.y + self.buffer.height() as i64
    }
}

fn place<'a>(items: &'a [CompositionItem], options: &CompositionOptions) -> OpsResult<Vec<Placement<'a>>> {
    let Some(auto) = options.auto_layout else {
        return Ok(items
            .iter()
            .map(|it| Placement {
                x: it.position.x as i64,
                y: it.position.y as i64,
                buffer: Cow::Borrowed(&it.buffer),
            })
            .collect());
    };

    let (slot_w, slot_h) = auto.fixed_size.unwrap_or_else(|| {
        (
            items.iter().map(|it| it.buffer.width()).max().unwrap_or(0),
            items.iter().map(|it| it.buffer.height()).max().unwrap_or(0),
        )
    });
    debug!(slot_w, slot_h, direction = %auto.direction, "auto layout");

    items
        .iter()
        .enumerate()
        .map(|(i, it)| -> OpsResult<Placement<'a>> {
            let i = i as i64;
            let (x, y) = match auto.direction {
                Direction::Horizontal => (i * (slot_w as i64 + options.gap as i64), 0),
                Direction::Vertical => (0, i * (slot_h as i64 + options.gap as i64)),
            };
            let buffer = match auto.fixed_size {
                Some((w, h)) if it.buffer.dimensions() != (w, h) => {
                    Cow::Owned(resize(&it.buffer, w, h, Filter::Bilinear)?)
                }
                _ => Cow::Borrowed(&it.buffer),
            };
            Ok(Placement { x, y, buffer })
        })
        .collect()
}

/// Composes `items` onto one canvas.
///
/// The canvas is `max(x + width) + 2 * padding` by
/// `max(y + height) + 2 * padding`; parts of items at negative offsets are
/// clipped. The background is filled first, then items are drawn in order.
///
/// # Errors
///
/// Returns [`OpsError::InvalidGeometry`] if there are no items, the canvas
/// would have zero area, or a fixed slot size is zero.
pub fn compose(items: &[CompositionItem], options: &CompositionOptions) -> OpsResult<PixelBuffer> {
    trace!(
        items = items.len(),
        gap = options.gap,
        padding = options.padding,
        auto = options.auto_layout.is_some(),
        "compose"
    );
    if items.is_empty() {
        return Err(OpsError::geometry("nothing to compose"));
    }

    let placements = place(items, options)?;
    let pad = options.padding as i64;
    let total_w = placements.iter().map(Placement::right).max().unwrap_or(0).max(0);
    let total_h = placements.iter().map(Placement::bottom).max().unwrap_or(0).max(0);
    let canvas_w = total_w + 2 * pad;
    let canvas_h = total_h + 2 * pad;
    debug!(canvas_w, canvas_h, "compose canvas");

    if canvas_w <= 0 || canvas_h <= 0 || canvas_w > u32::MAX as i64 || canvas_h > u32::MAX as i64 {
        return Err(OpsError::geometry(format!(
            "composition canvas {}x{} is not drawable",
            canvas_w, canvas_h
        )));
    }

    let mut canvas = PixelBuffer::filled(canvas_w as u32, canvas_h as u32, options.background.to_rgba(255))?;
    for p in &placements {
        blit_over(&mut canvas, &p.buffer, p.x + pad, p.y + pad);
    }

    if options.gap > 0 {
        let gap = options.gap as i64;
        for p in &placements {
            let (x, y) = (p.x + pad, p.y + pad);
            let (w, h) = (p.buffer.width() as i64, p.buffer.height() as i64);
            let next_x = x + w + gap;
            let next_y = y + h + gap;
            if next_x < canvas_w - pad {
                let line_x = next_x - (gap + 1) / 2;
                darken_column(&mut canvas, line_x, y, y + h);
            }
            if next_y < canvas_h - pad {
                let line_y = next_y - (gap + 1) / 2;
                darken_row(&mut canvas, line_y, x, x + w);
            }
        }
    }

    Ok(canvas)
}

/// Source-over of one straight-alpha pixel onto another, `0..=1` scale.
#[inline]
fn over(fg: [f32; 4], bg: [f32; 4]) -> [f32; 4] {
    let fa = fg[3];
    let ba = bg[3];
    let out_a = fa + ba * (1.0 - fa);
    if out_a < 1e-8 {
        return [0.0; 4];
    }
    let mut out = [0.0, 0.0, 0.0, out_a];
    for c in 0..3 {
        out[c] = (fg[c] * fa + bg[c] * ba * (1.0 - fa)) / out_a;
    }
    out
}

/// Draws `src` at `(x, y)` with source-over, clipped to `dst`.
fn blit_over(dst: &mut PixelBuffer, src: &PixelBuffer, x: i64, y: i64) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + src.width() as i64).min(dst.width() as i64);
    let y1 = (y + src.height() as i64).min(dst.height() as i64);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for dy in y0..y1 {
        let src_row = src.row((dy - y) as u32);
        let dst_row = dst.row_mut(dy as u32);
        for dx in x0..x1 {
            let s = &src_row[(dx - x) as usize * CHANNELS..][..CHANNELS];
            let d = &mut dst_row[dx as usize * CHANNELS..][..CHANNELS];
            match s[3] {
                255 => d.copy_from_slice(s),
                0 => {}
                _ => {
                    let fg = [s[0], s[1], s[2], s[3]].map(|v| v as f32 / 255.0);
                    let bg = [d[0], d[1], d[2], d[3]].map(|v| v as f32 / 255.0);
                    let out = over(fg, bg);
                    for c in 0..CHANNELS {
                        d[c] = (out[c] * 255.0).round().clamp(0.0, 255.0) as u8;
                    }
                }
            }
        }
    }
}

fn darken(px: &mut [u8]) {
    for v in &mut px[..3] {
        *v = (*v as f32 * SEPARATOR_KEEP).round() as u8;
    }
}

fn darken_column(canvas: &mut PixelBuffer, x: i64, y0: i64, y1: i64) {
    if x < 0 || x >= canvas.width() as i64 {
        return;
    }
    let o = x as usize * CHANNELS;
    for y in y0.max(0)..y1.min(canvas.height() as i64) {
        darken(&mut canvas.row_mut(y as u32)[o..o + CHANNELS]);
    }
}

fn darken_row(canvas: &mut PixelBuffer, y: i64, x0: i64, x1: i64) {
    if y < 0 || y >= canvas.height() as i64 {
        return;
    }
    let row = canvas.row_mut(y as u32);
    for x in x0.max(0)..x1.min(row.len() as i64 / CHANNELS as i64) {
        let o = x as usize * CHANNELS;
        darken(&mut row[o..o + CHANNELS]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, v: u8) -> PixelBuffer {
        PixelBuffer::filled(w, h, [v, v, v, 255]).unwrap()
    }

    #[test]
    fn test_bounding_box_with_manual_positions() {
        let items = vec![
            CompositionItem::new(solid(10, 10, 0), 0, 0),
            CompositionItem::new(solid(5, 20, 0), 30, 7),
        ];
        let opts = CompositionOptions { padding: 3, ..Default::default() };
        let out = compose(&items, &opts).unwrap();
        assert_eq!(out.dimensions(), (35 + 6, 27 + 6));
        assert_eq!(out.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(out.pixel(3, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn test_negative_positions_are_clipped() {
        let items = vec![CompositionItem::new(solid(10, 10, 9), -4, -4)];
        let out = compose(&items, &CompositionOptions::default()).unwrap();
        assert_eq!(out.dimensions(), (6, 6));
        assert_eq!(out.pixel(0, 0), [9, 9, 9, 255]);
    }

    #[test]
    fn test_fully_offscreen_is_geometry_error() {
        let items = vec![CompositionItem::new(solid(4, 4, 0), -10, -10)];
        assert!(compose(&items, &CompositionOptions::default()).unwrap_err().is_geometry_error());
        assert!(compose(&[], &CompositionOptions::default()).is_err());
    }

    #[test]
    fn test_later_items_overwrite() {
        let items = vec![
            CompositionItem::new(solid(4, 4, 10), 0, 0),
            CompositionItem::new(solid(2, 2, 200), 1, 1),
        ];
        let out = compose(&items, &CompositionOptions::default()).unwrap();
        assert_eq!(out.pixel(0, 0)[0], 10);
        assert_eq!(out.pixel(1, 1)[0], 200);
    }

    #[test]
    fn test_source_alpha_blends() {
        let half = PixelBuffer::filled(2, 2, [0, 0, 0, 128]).unwrap();
        let transparent = PixelBuffer::new(2, 2).unwrap();
        let items = vec![
            CompositionItem::new(half, 0, 0),
            CompositionItem::new(transparent, 2, 0),
        ];
        let out = compose(&items, &CompositionOptions::default()).unwrap();
        assert_eq!(out.pixel(0, 0), [127, 127, 127, 255]);
        assert_eq!(out.pixel(3, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn test_auto_layout_uses_max_slot() {
        let items = vec![
            CompositionItem::new(solid(10, 4, 0), 99, 99),
            CompositionItem::new(solid(6, 8, 0), -5, 3),
        ];
        let opts = CompositionOptions {
            gap: 2,
            auto_layout: Some(AutoLayout::default()),
            ..Default::default()
        };
        let out = compose(&items, &opts).unwrap();
        // second slot starts at 10 + 2
        assert_eq!(out.dimensions(), (12 + 6, 8));
        assert_eq!(out.pixel(12, 7)[0], 0);
        assert_eq!(out.pixel(0, 6)[0], 255);
    }

    #[test]
    fn test_auto_layout_fixed_size_resamples() {
        let items = vec![
            CompositionItem::new(solid(3, 3, 50), 0, 0),
            CompositionItem::new(solid(9, 1, 50), 0, 0),
        ];
        let opts = CompositionOptions {
            auto_layout: Some(AutoLayout {
                direction: Direction::Vertical,
                fixed_size: Some((5, 5)),
            }),
            ..Default::default()
        };
        let out = compose(&items, &opts).unwrap();
        assert_eq!(out.dimensions(), (5, 10));
        assert!(out.pixels().all(|(_, _, p)| p == [50, 50, 50, 255]));
    }

    #[test]
    fn test_separator_drawn_between_items() {
        let items = vec![
            CompositionItem::new(solid(4, 4, 0), 0, 0),
            CompositionItem::new(solid(4, 4, 0), 8, 0),
        ];
        let opts = CompositionOptions { gap: 4, ..Default::default() };
        let out = compose(&items, &opts).unwrap();
        assert_eq!(out.dimensions(), (12, 4));
        // next_x = 8, line at 8 - 2 = 6
        assert_eq!(out.pixel(6, 1), [242, 242, 242, 255]);
        assert_eq!(out.pixel(5, 1), [255, 255, 255, 255]);
        // last item: next_x = 16 is past the canvas, no line
        assert!((0..4).all(|y| out.pixel(11, y)[0] == 0));
    }

    #[test]
    fn test_vertical_separator_between_items() {
        let items = vec![
            CompositionItem::new(solid(4, 4, 0), 0, 0),
            CompositionItem::new(solid(4, 4, 0), 0, 7),
        ];
        let opts = CompositionOptions { gap: 3, ..Default::default() };
        let out = compose(&items, &opts).unwrap();
        assert_eq!(out.dimensions(), (4, 11));
        // next_y = 7, line at 7 - ceil(3 / 2) = 5
        assert!((0..4).all(|x| out.pixel(x, 5) == [242, 242, 242, 255]));
        assert_eq!(out.pixel(1, 4), [255, 255, 255, 255]);
        assert_eq!(out.pixel(1, 6), [255, 255, 255, 255]);
        assert!((7..11).all(|y| out.pixel(2, y)[0] == 0));
    }

    #[test]
    fn test_stack_layout_center() {
        let pos = stack_layout(&[(10, 10), (4, 5)], Direction::Horizontal, Align::Center, 3);
        assert_eq!(pos, vec![Position::new(0, 0), Position::new(13, 2)]);
        assert!(stack_layout(&[], Direction::Vertical, Align::End, 1).is_empty());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Vertical".parse::<Direction>().unwrap(), Direction::Vertical);
        assert_eq!("center".parse::<Align>().unwrap(), Align::Center);
        assert!(matches!("diagonal".parse::<Direction>(), Err(Error::Parse(_))));
        assert!(matches!("middle-ish".parse::<Align>(), Err(Error::Parse(_))));
    }
}
