//! Rayon-parallel ISR sweep (feature-gated).
//!
//! Rows are distributed across the thread pool. Each task owns one disjoint
//! output row, so the only join is collecting the finished buffer.

use rayon::prelude::*;

use crate::grid::{Grid, MatchGrid};
use crate::kernel::{classify, SweepInputs};
use crate::quality::QualityFilter;
use crate::trace::trace_span;
use crate::util::IsrResult;

/// Row-parallel sweep with results identical to `scalar::sweep`.
pub fn sweep_par<F>(inputs: &SweepInputs<'_>, filter: &F) -> IsrResult<MatchGrid>
where
    F: QualityFilter + Sync + ?Sized,
{
    let shape = inputs.comparison.shape();
    let _span = trace_span!("isr_sweep_rayon", rows = shape.rows, cols = shape.cols).entered();

    let mut data = vec![false; shape.len()];
    data.par_chunks_mut(shape.cols)
        .enumerate()
        .for_each(|(row, out_row)| {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = classify(inputs, filter, row, col);
            }
        });

    Grid::new(data, shape.rows, shape.cols)
}
