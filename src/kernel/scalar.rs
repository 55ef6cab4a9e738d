//! Single-threaded ISR sweep.

use crate::grid::{Grid, MatchGrid};
use crate::kernel::{classify, SweepInputs};
use crate::quality::QualityFilter;
use crate::trace::{trace_progress, trace_span};
use crate::util::IsrResult;

/// Classifies every pixel in row-major order, writing each cell once.
///
/// When `report_progress` is set, a debug event is emitted after each row.
/// Progress is observational only.
pub fn sweep<F>(inputs: &SweepInputs<'_>, filter: &F, report_progress: bool) -> IsrResult<MatchGrid>
where
    F: QualityFilter + ?Sized,
{
    let shape = inputs.comparison.shape();
    let _span = trace_span!("isr_sweep_scalar", rows = shape.rows, cols = shape.cols).entered();

    Grid::from_fn(shape.rows, shape.cols, |row, col| {
        let matched = classify(inputs, filter, row, col);
        if report_progress && col + 1 == shape.cols {
            trace_progress!("isr_sweep_progress", row + 1, shape.rows);
        }
        matched
    })
}
