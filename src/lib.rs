//! isrmap computes the Indexing Success Rate (ISR) between two EBSD scans.
//!
//! For each pixel of a comparison scan the orientation is checked against
//! the reference orientations in the clamped 3x3 block around the same grid
//! location. The result is a boolean match map and the fraction of matched
//! pixels. Row-parallel sweeps are available via the `rayon` feature.

pub mod grid;
pub mod io;
pub mod isr;
pub mod kernel;
pub mod orientation;
pub mod quality;
pub(crate) mod trace;
pub mod util;

pub use grid::{Grid, MatchGrid, Neighborhood, OrientationGrid, QualityGrid, Shape};
pub use io::{match_map_path, read_match_map, read_scan, write_match_map, ScanColumns, ScanGrid};
pub use isr::{compute_isr, format_isr_line, IsrConfig, IsrMatcher, IsrReport, DEFAULT_DEVIATION_DEG};
pub use orientation::{Orientation, Symmetry};
pub use quality::{Modality, QualityField, QualityFilter};
pub use util::{IsrError, IsrResult};
