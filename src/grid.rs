//! Fractional screen grids.
//!
//! A [`ScreenGrid`] slices the usable screen area into equal columns and
//! rows, each a fixed fraction of the bounds.  Fractions need not tile the
//! screen exactly: the sixth layouts use columns of `0.33` of the width,
//! leaving a sliver on the right edge.
//!
//! Cells are addressed `(col, row)` with `row 0` at the **bottom**, matching
//! the Cartesian screen convention.

use crate::geometry::{Point, Rect, Size};

/// A `cols × rows` grid laid over a screen's bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGrid {
    /// Column width as a fraction of the bounds width.
    col_fraction: f64,
    /// Row height as a fraction of the bounds height.
    row_fraction: f64,
}

impl ScreenGrid {
    /// A grid whose cells are `col_fraction × row_fraction` of the bounds.
    pub const fn new(col_fraction: f64, row_fraction: f64) -> Self {
        Self {
            col_fraction,
            row_fraction,
        }
    }

    /// One full-height row split into columns of `col_fraction`.
    pub const fn columns(col_fraction: f64) -> Self {
        Self::new(col_fraction, 1.0)
    }

    /// Size of a single cell within `bounds`.
    pub fn cell_size(&self, bounds: &Rect) -> Size {
        bounds.size.scale(self.col_fraction, self.row_fraction)
    }

    /// The rectangle of cell `(col, row)` within `bounds`.
    pub fn cell(&self, bounds: &Rect, col: usize, row: usize) -> Rect {
        let size = self.cell_size(bounds);
        Rect::new(
            Point::new(
                bounds.min_x() + size.width * col as f64,
                bounds.min_y() + size.height * row as f64,
            ),
            size,
        )
    }

    /// The cell in column `col` touching the top edge of `bounds`.
    ///
    /// Anchored to `max_y` rather than counted up from the bottom, so the
    /// cell sits flush with the top even when rows do not tile the height.
    pub fn top_cell(&self, bounds: &Rect, col: usize) -> Rect {
        let mut cell = self.cell(bounds, col, 0);
        cell.origin.y = bounds.max_y() - cell.size.height;
        cell
    }
}
