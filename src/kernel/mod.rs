//! Neighborhood matching kernels for the ISR sweep.
//!
//! `match_pixel` is the per-pixel existence test; `scalar` and `rayon`
//! sweep it over the whole grid. Both assume the inputs were validated to
//! share one shape.

use crate::grid::{Neighborhood, OrientationGrid, QualityGrid};
use crate::orientation::misorientation_rad;
use crate::quality::QualityFilter;

/// Validated inputs shared by the sweep implementations.
#[derive(Clone, Copy)]
pub struct SweepInputs<'a> {
    pub comparison: &'a OrientationGrid,
    pub quality: &'a QualityGrid,
    pub reference: &'a OrientationGrid,
    /// Match threshold in radians; a pair matches when strictly below it.
    pub threshold_rad: f64,
}

/// Returns true if the comparison orientation at `(row, col)` is within
/// `threshold_rad` of any reference orientation in its clamped 3x3 block.
///
/// Non-indexed cells on either side never match; the search continues with
/// the next neighbor. A position outside either grid never matches.
pub fn match_pixel(
    comparison: &OrientationGrid,
    reference: &OrientationGrid,
    row: usize,
    col: usize,
    threshold_rad: f64,
) -> bool {
    if row >= reference.rows() || col >= reference.cols() {
        return false;
    }
    let centre = comparison.get(row, col).and_then(Option::as_ref);
    Neighborhood::clamped(reference.shape(), row, col)
        .cells()
        .any(|(r, c)| {
            let neighbor = reference.get(r, c).and_then(Option::as_ref);
            misorientation_rad(centre, neighbor) < threshold_rad
        })
}

/// Skip-or-match classification for one pixel.
#[inline]
pub(crate) fn classify<F>(inputs: &SweepInputs<'_>, filter: &F, row: usize, col: usize) -> bool
where
    F: QualityFilter + ?Sized,
{
    let Some(&quality) = inputs.quality.get(row, col) else {
        return false;
    };
    if filter.is_missing(quality) {
        return false;
    }
    match_pixel(
        inputs.comparison,
        inputs.reference,
        row,
        col,
        inputs.threshold_rad,
    )
}

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;
