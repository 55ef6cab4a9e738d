//! Dense 2D grids for orientation, quality, and match maps.
//!
//! `Grid` is an owned row-major buffer. Rows correspond to the scan's `y`
//! axis (`ny`) and columns to its `x` axis (`nx`); `get(row, col)` addresses
//! the same physical location in every grid built from the same scan.

use crate::orientation::Orientation;
use crate::util::{IsrError, IsrResult};

pub mod neighborhood;

pub use neighborhood::Neighborhood;

/// Per-pixel orientation, `None` for pixels that were not indexed.
pub type OrientationGrid = Grid<Option<Orientation>>;

/// Per-pixel quality value; NaN marks a missing value.
pub type QualityGrid = Grid<f32>;

/// Per-pixel match flags produced by the ISR sweep.
pub type MatchGrid = Grid<bool>;

/// Grid extent in rows (`ny`) and columns (`nx`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns true if the shape has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails with `InvalidInputShape` when `other` differs from `self`.
    pub fn ensure_matches(&self, name: &'static str, other: Shape) -> IsrResult<()> {
        if *self == other {
            return Ok(());
        }
        Err(IsrError::InvalidInputShape {
            name,
            expected_rows: self.rows,
            expected_cols: self.cols,
            rows: other.rows,
            cols: other.cols,
        })
    }
}

/// Owned row-major 2D grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Grid<T> {
    /// Wraps a row-major buffer of exactly `rows * cols` elements.
    pub fn new(data: Vec<T>, rows: usize, cols: usize) -> IsrResult<Self> {
        let needed = cell_count(rows, cols)?;
        if data.len() != needed {
            return Err(IsrError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> IsrResult<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        let needed = cell_count(rows, cols)?;
        let mut data = Vec::with_capacity(needed);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Ok(Self { data, rows, cols })
    }

    /// Number of rows (`ny`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (`nx`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape {
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Returns the backing row-major slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the cell at `(row, col)` if it is within bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    /// Returns a mutable reference to the cell at `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get_mut(row * self.cols + col)
    }

    /// Returns row `row` as a slice of length `cols`.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Iterates over rows top to bottom.
    pub fn iter_rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.cols)
    }

    /// Applies `f` to every cell, preserving the shape.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            data: self.data.iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(value: T, rows: usize, cols: usize) -> IsrResult<Self> {
        let needed = cell_count(rows, cols)?;
        Ok(Self {
            data: vec![value; needed],
            rows,
            cols,
        })
    }
}

impl Grid<bool> {
    /// Number of `true` cells.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}

fn cell_count(rows: usize, cols: usize) -> IsrResult<usize> {
    if rows == 0 || cols == 0 {
        return Err(IsrError::InvalidDimensions { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(IsrError::InvalidDimensions { rows, cols })
}
