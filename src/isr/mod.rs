//! Indexing Success Rate between a comparison scan and a reference scan.
//!
//! A comparison pixel counts as a success when its quality value is present
//! and its orientation lies strictly within the deviation threshold of at
//! least one reference orientation in the clamped 3x3 block around the same
//! location. The ISR is the number of successes divided by the total number
//! of pixels, skipped pixels included.

use crate::grid::{MatchGrid, OrientationGrid, QualityGrid};
use crate::kernel::SweepInputs;
use crate::quality::QualityFilter;
use crate::trace::{trace_event, trace_span};
use crate::util::math::deg_to_rad;
use crate::util::{IsrError, IsrResult};

/// Default angular threshold in degrees.
pub const DEFAULT_DEVIATION_DEG: f64 = 5.0;

/// Configuration for an ISR run.
#[derive(Clone, Debug)]
pub struct IsrConfig {
    /// Angular match threshold in degrees; must be finite and positive.
    pub deviation_deg: f64,
    /// Sweep rows in parallel (requires the `rayon` feature; ignored otherwise).
    pub parallel: bool,
    /// Emit per-row progress events during the scalar sweep.
    pub report_progress: bool,
}

impl Default for IsrConfig {
    fn default() -> Self {
        Self {
            deviation_deg: DEFAULT_DEVIATION_DEG,
            parallel: false,
            report_progress: false,
        }
    }
}

impl IsrConfig {
    pub fn validate(&self) -> IsrResult<()> {
        if !self.deviation_deg.is_finite() || self.deviation_deg <= 0.0 {
            return Err(IsrError::config(format!(
                "deviation must be a positive number of degrees, got {}",
                self.deviation_deg
            )));
        }
        Ok(())
    }
}

/// Result of an ISR run.
#[derive(Clone, Debug, PartialEq)]
pub struct IsrReport {
    /// Fraction of matched pixels, in `[0, 1]`.
    pub isr: f64,
    /// Per-pixel match flags, same shape as the comparison grid.
    pub matches: MatchGrid,
    /// Number of `true` cells in `matches`.
    pub matched: usize,
    /// Number of pixels skipped for a missing quality value.
    pub skipped: usize,
}

/// Console summary line, e.g. `ISR_RK = 0.8734`.
pub fn format_isr_line(isr: f64) -> String {
    format!("ISR_RK = {isr:.4}")
}

/// Runs ISR computations with a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct IsrMatcher {
    config: IsrConfig,
}

impl IsrMatcher {
    pub fn new(config: IsrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IsrConfig {
        &self.config
    }

    /// Validates the inputs, sweeps every pixel, and reduces to the ISR.
    ///
    /// Fails before any pixel is processed if the grid shapes differ or the
    /// deviation is not positive.
    pub fn run<F>(
        &self,
        comparison: &OrientationGrid,
        quality: &QualityGrid,
        reference: &OrientationGrid,
        filter: &F,
    ) -> IsrResult<IsrReport>
    where
        F: QualityFilter + Sync + ?Sized,
    {
        self.config.validate()?;
        let shape = comparison.shape();
        shape.ensure_matches("quality", quality.shape())?;
        shape.ensure_matches("reference", reference.shape())?;

        let _span = trace_span!(
            "isr",
            rows = shape.rows,
            cols = shape.cols,
            deviation_deg = self.config.deviation_deg
        )
        .entered();

        let inputs = SweepInputs {
            comparison,
            quality,
            reference,
            threshold_rad: deg_to_rad(self.config.deviation_deg),
        };
        let matches = self.sweep(&inputs, filter)?;

        let matched = matches.count_true();
        let skipped = quality
            .as_slice()
            .iter()
            .filter(|&&q| filter.is_missing(q))
            .count();
        let isr = matched as f64 / shape.len() as f64;
        trace_event!("isr_result", isr = isr, matched = matched, skipped = skipped);

        Ok(IsrReport {
            isr,
            matches,
            matched,
            skipped,
        })
    }

    #[cfg(feature = "rayon")]
    fn sweep<F>(&self, inputs: &SweepInputs<'_>, filter: &F) -> IsrResult<MatchGrid>
    where
        F: QualityFilter + Sync + ?Sized,
    {
        if self.config.parallel {
            crate::kernel::rayon::sweep_par(inputs, filter)
        } else {
            crate::kernel::scalar::sweep(inputs, filter, self.config.report_progress)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn sweep<F>(&self, inputs: &SweepInputs<'_>, filter: &F) -> IsrResult<MatchGrid>
    where
        F: QualityFilter + Sync + ?Sized,
    {
        crate::kernel::scalar::sweep(inputs, filter, self.config.report_progress)
    }
}

/// Computes the ISR with `deviation_deg` and default settings otherwise.
pub fn compute_isr<F>(
    comparison: &OrientationGrid,
    quality: &QualityGrid,
    reference: &OrientationGrid,
    deviation_deg: f64,
    filter: &F,
) -> IsrResult<IsrReport>
where
    F: QualityFilter + Sync + ?Sized,
{
    IsrMatcher::new(IsrConfig {
        deviation_deg,
        ..IsrConfig::default()
    })
    .run(comparison, quality, reference, filter)
}
