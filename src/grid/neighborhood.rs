//! Clamped 3x3 neighborhoods.

use std::ops::RangeInclusive;

use crate::grid::Shape;

/// Rectangular block of cells around a centre pixel, clipped to the grid.
///
/// Edge and corner pixels get a smaller block; cells outside the grid are
/// never visited and the grid never wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    row_start: usize,
    row_end: usize,
    col_start: usize,
    col_end: usize,
}

impl Neighborhood {
    /// Radius of the kernel around the centre pixel.
    pub const RADIUS: usize = 1;

    /// Returns the neighborhood of `(row, col)` in a grid of `shape`.
    ///
    /// `(row, col)` must lie inside `shape`.
    pub fn clamped(shape: Shape, row: usize, col: usize) -> Self {
        debug_assert!(row < shape.rows && col < shape.cols);
        Self {
            row_start: row.saturating_sub(Self::RADIUS),
            row_end: (row + Self::RADIUS).min(shape.rows - 1),
            col_start: col.saturating_sub(Self::RADIUS),
            col_end: (col + Self::RADIUS).min(shape.cols - 1),
        }
    }

    pub fn rows(&self) -> RangeInclusive<usize> {
        self.row_start..=self.row_end
    }

    pub fn cols(&self) -> RangeInclusive<usize> {
        self.col_start..=self.col_end
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        (self.row_end - self.row_start + 1) * (self.col_end - self.col_start + 1)
    }

    /// Always false: the centre pixel is part of its own neighborhood.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates `(row, col)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.cols();
        self.rows()
            .flat_map(move |row| cols.clone().map(move |col| (row, col)))
    }
}
