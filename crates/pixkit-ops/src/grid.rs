//! N x N grid slicing and reassembly.
//!
//! [`slice_grid`] center-crops a buffer to its largest square and cuts it
//! into `grid_size²` equal cells, row-major. Each cell can be framed by
//! `padding` pixels of background. [`assemble_grid`] lays cells back out on
//! one sheet, using the `gap` that slicing itself ignores.
//!
//! ```text
//! +-------+-------+-------+
//! | (0,0) | (0,1) | (0,2) |     cell = floor(min(W, H) / n)
//! +-------+-------+-------+     offset = floor((W - min(W, H)) / 2), same for H
//! | (1,0) | (1,1) | (1,2) |
//! +-------+-------+-------+
//! | (2,0) | (2,1) | (2,2) |
//! +-------+-------+-------+
//! ```
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::PixelBuffer;
//! use pixkit_ops::grid::{slice_grid, GridConfig};
//!
//! let img = PixelBuffer::filled(100, 60, [1, 2, 3, 255]).unwrap();
//! let cells = slice_grid(&img, &GridConfig { padding: 4, ..Default::default() }).unwrap();
//! assert_eq!(cells.len(), 9);
//! assert_eq!(cells[0].dimensions(), (20 + 8, 20 + 8));
//! ```

use crate::{OpsError, OpsResult};
use pixkit_core::{PixelBuffer, Rect, Rgb};
use tracing::{debug, trace};

/// Smallest supported grid.
pub const MIN_GRID: u32 = 2;

/// Largest supported grid.
pub const MAX_GRID: u32 = 3;

/// Grid slicing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Cells per side; clamped into `2..=3`.
    pub grid_size: u32,
    /// Background frame around each cell, pixels.
    pub padding: u32,
    /// Spacing between cells when reassembled; not applied by slicing.
    pub gap: u32,
    /// Frame and gap fill color.
    #[cfg_attr(feature = "serde", serde(alias = "background_color"))]
    pub background: Rgb,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: MAX_GRID,
            padding: 0,
            gap: 0,
            background: Rgb::WHITE,
        }
    }
}

impl GridConfig {
    /// Returns a copy with `grid_size` forced into `2..=3`.
    pub fn clamped(&self) -> Self {
        Self {
            grid_size: self.grid_size.clamp(MIN_GRID, MAX_GRID),
            ..*self
        }
    }

    /// Number of cells produced.
    pub fn cell_count(&self) -> usize {
        let n = self.clamped().grid_size as usize;
        n * n
    }
}

/// Source rectangles of each cell, row-major.
///
/// # Errors
///
/// Returns [`OpsError::InvalidGeometry`] if the square is smaller than
/// the grid.
pub fn cell_regions(width: u32, height: u32, grid_size: u32) -> OpsResult<Vec<Rect>> {
    let n = grid_size.clamp(MIN_GRID, MAX_GRID);
    let square = Rect::centered_square(width, height);
    let cell = square.width / n;
    if cell == 0 {
        return Err(OpsError::geometry(format!(
            "{}x{} is too small for a {}x{} grid",
            width, height, n, n
        )));
    }
    debug!(size = square.width, cell, ox = square.x, oy = square.y, "grid layout");

    Ok((0..n)
        .flat_map(|row| {
            (0..n).map(move |col| Rect::new(square.x + col * cell, square.y + row * cell, cell, cell))
        })
        .collect())
}

/// Slices `src` into `grid_size²` cells, row-major.
///
/// Each cell is `cell + 2 * padding` pixels square, filled with the
/// opaque background and overwritten with the source cell at
/// `(padding, padding)`.
///
/// # Errors
///
/// Returns [`OpsError::InvalidGeometry`] if the centered square is
/// smaller than `grid_size` pixels.
pub fn slice_grid(src: &PixelBuffer, config: &GridConfig) -> OpsResult<Vec<PixelBuffer>> {
    let config = config.clamped();
    trace!(
        width = src.width(),
        height = src.height(),
        grid_size = config.grid_size,
        padding = config.padding,
        "slice_grid"
    );

    let regions = cell_regions(src.width(), src.height(), config.grid_size)?;
    let bg = config.background.to_rgba(255);
    let pad = config.padding;

    regions
        .into_iter()
        .map(|region| -> OpsResult<PixelBuffer> {
            let cell = src.sub_image(region)?;
            if pad == 0 {
                return Ok(cell);
            }
            let side = pad
                .checked_mul(2)
                .and_then(|frame| frame.checked_add(region.width))
                .ok_or_else(|| OpsError::geometry(format!("padding {} overflows the cell size", pad)))?;
            let mut framed = PixelBuffer::filled(side, side, bg)?;
            framed.paste(&cell, pad as i64, pad as i64);
            Ok(framed)
        })
        .collect()
}

/// Lays `cells` out row-major on one sheet with `gap` pixels between them.
///
/// The sheet is filled with the opaque background first; cells are copied
/// without blending.
///
/// # Errors
///
/// Returns [`OpsError::InvalidGeometry`] unless there are exactly
/// `grid_size²` cells of identical size.
///
/// # Example
///
/// ```rust
/// use pixkit_core::{PixelBuffer, Rgb};
/// use pixkit_ops::grid::assemble_grid;
///
/// let cells = vec![PixelBuffer::filled(10, 10, [0, 0, 0, 255]).unwrap(); 4];
/// let sheet = assemble_grid(&cells, 2, 2, Rgb::WHITE).unwrap();
/// assert_eq!(sheet.dimensions(), (22, 22));
/// assert_eq!(sheet.pixel(10, 0), [255, 255, 255, 255]);
/// ```
pub fn assemble_grid(
    cells: &[PixelBuffer],
    grid_size: u32,
    gap: u32,
    background: Rgb,
) -> OpsResult<PixelBuffer> {
    let n = grid_size.clamp(MIN_GRID, MAX_GRID);
    trace!(cells = cells.len(), grid_size = n, gap, "assemble_grid");

    if cells.len() != (n * n) as usize {
        return Err(OpsError::geometry(format!(
            "expected {} cells for a {}x{} grid, got {}",
            n * n,
            n,
            n,
            cells.len()
        )));
    }
    let (cw, ch) = cells[0].dimensions();
    if let Some(odd) = cells.iter().find(|c| c.dimensions() != (cw, ch)) {
        return Err(OpsError::geometry(format!(
            "cell size {}x{} differs from {}x{}",
            odd.width(),
            odd.height(),
            cw,
            ch
        )));
    }

    let extent = |cell: u32| {
        let span = n as u64 * cell as u64 + (n - 1) as u64 * gap as u64;
        u32::try_from(span)
            .map_err(|_| OpsError::geometry(format!("grid sheet side {} exceeds u32", span)))
    };
    let sheet_w = extent(cw)?;
    let sheet_h = extent(ch)?;
    let mut sheet = PixelBuffer::filled(sheet_w, sheet_h, background.to_rgba(255))?;
    for (i, cell) in cells.iter().enumerate() {
        let (row, col) = ((i as u32 / n) as i64, (i as u32 % n) as i64);
        sheet.paste(cell, col * (cw as i64 + gap as i64), row * (ch as i64 + gap as i64));
    }
    Ok(sheet)
}
