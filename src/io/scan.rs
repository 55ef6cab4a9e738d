//! Columnar scan text and gridding of scattered scan points.
//!
//! Each data line holds whitespace-separated numbers; lines starting with
//! `#` are header lines. `# XSTEP:`/`# YSTEP:` set the grid step when
//! present, otherwise the step is the median spacing between distinct
//! coordinates. Only square grids are gridded: `# GRID: HexGrid` is rejected,
//! as is any layout that leaves half or more of the dense grid empty. Grid
//! cells without a point get no orientation and a NaN quality value.

use std::path::Path;

use crate::grid::{Grid, OrientationGrid, QualityGrid};
use crate::orientation::{Orientation, Symmetry};
use crate::quality::Modality;
use crate::trace::{trace_event, trace_span};
use crate::util::{IsrError, IsrResult};

/// Relative tolerance under which two coordinates are the same value.
const STEP_EPS: f64 = 1e-6;

/// Largest allowed distance from a grid node, as a fraction of the step.
const SNAP_TOL: f64 = 0.25;

/// Zero-based column indices of the fields read from each data line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanColumns {
    pub phi1: usize,
    pub big_phi: usize,
    pub phi2: usize,
    pub x: usize,
    pub y: usize,
    pub quality: usize,
}

impl ScanColumns {
    /// Standard `phi1 Phi phi2 x y` layout with the modality's quality column.
    pub fn for_modality(modality: Modality) -> Self {
        Self {
            phi1: 0,
            big_phi: 1,
            phi2: 2,
            x: 3,
            y: 4,
            quality: modality.default_quality_column(),
        }
    }

    fn max_index(&self) -> usize {
        [
            self.phi1,
            self.big_phi,
            self.phi2,
            self.x,
            self.y,
            self.quality,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

impl Default for ScanColumns {
    fn default() -> Self {
        Self::for_modality(Modality::default())
    }
}

/// Gridded scan: orientations plus the parallel quality grid.
#[derive(Clone, Debug)]
pub struct ScanGrid {
    pub orientations: OrientationGrid,
    pub quality: QualityGrid,
    /// Coordinate step along `x` (columns).
    pub step_x: f64,
    /// Coordinate step along `y` (rows).
    pub step_y: f64,
}

struct ScanPoint {
    line: usize,
    x: f64,
    y: f64,
    orientation: Option<Orientation>,
    quality: f32,
}

/// Grid layout declared in the scan header.
#[derive(Default)]
struct ScanHeader {
    step_x: Option<f64>,
    step_y: Option<f64>,
}

impl ScanHeader {
    fn apply(&mut self, line_no: usize, line: &str) -> IsrResult<()> {
        let Some((key, value)) = line.trim_start_matches('#').split_once(':') else {
            return Ok(());
        };
        let value = value.trim();
        match key.trim().to_ascii_uppercase().as_str() {
            "GRID" if value.eq_ignore_ascii_case("hexgrid") => Err(IsrError::config(
                "hexagonal scan grids are not supported; resample to a square grid",
            )),
            "XSTEP" => {
                self.step_x = Some(parse_step(line_no, value)?);
                Ok(())
            }
            "YSTEP" => {
                self.step_y = Some(parse_step(line_no, value)?);
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn parse_step(line: usize, value: &str) -> IsrResult<f64> {
    match value.parse::<f64>() {
        Ok(step) if step.is_finite() && step > 0.0 => Ok(step),
        _ => Err(IsrError::Parse {
            line,
            reason: format!("step must be a positive number, got `{value}`"),
        }),
    }
}

/// Parses scan text and grids it.
pub fn parse_scan(text: &str, columns: ScanColumns, symmetry: Symmetry) -> IsrResult<ScanGrid> {
    let needed = columns.max_index() + 1;
    let mut header = ScanHeader::default();
    let mut points = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            header.apply(idx + 1, line)?;
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < needed {
            return Err(IsrError::Parse {
                line: idx + 1,
                reason: format!("expected at least {needed} columns, got {}", fields.len()),
            });
        }
        let number = |col: usize| -> IsrResult<f64> {
            fields[col].parse::<f64>().map_err(|_| IsrError::Parse {
                line: idx + 1,
                reason: format!("column {col}: `{}` is not a number", fields[col]),
            })
        };
        let x = number(columns.x)?;
        let y = number(columns.y)?;
        if !x.is_finite() || !y.is_finite() {
            return Err(IsrError::Parse {
                line: idx + 1,
                reason: "non-finite coordinate".to_string(),
            });
        }
        let orientation = Orientation::from_bunge_euler(
            number(columns.phi1)?,
            number(columns.big_phi)?,
            number(columns.phi2)?,
            symmetry,
        )
        .ok();
        points.push(ScanPoint {
            line: idx + 1,
            x,
            y,
            orientation,
            quality: number(columns.quality)? as f32,
        });
    }
    gridify(points, &header)
}

/// Reads a scan file and grids it.
pub fn read_scan<P: AsRef<Path>>(
    path: P,
    columns: ScanColumns,
    symmetry: Symmetry,
) -> IsrResult<ScanGrid> {
    let path = path.as_ref();
    let _span = trace_span!("read_scan", path = %path.display()).entered();
    let text = std::fs::read_to_string(path).map_err(|err| IsrError::io(path, err))?;
    let scan = parse_scan(&text, columns, symmetry)?;
    trace_event!(
        "scan_loaded",
        rows = scan.orientations.rows(),
        cols = scan.orientations.cols()
    );
    Ok(scan)
}

struct Axis {
    name: &'static str,
    min: f64,
    step: f64,
    len: usize,
}

impl Axis {
    fn new(name: &'static str, values: &mut [f64], declared_step: Option<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        let min = values[0];
        let max = values[values.len() - 1];
        let tol = STEP_EPS * min.abs().max(max.abs()).max(1.0);

        let mut deltas: Vec<f64> = values
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|d| *d > tol)
            .collect();
        let step = match declared_step {
            Some(step) => step,
            None if deltas.is_empty() => 1.0,
            None => {
                deltas.sort_by(f64::total_cmp);
                deltas[deltas.len() / 2]
            }
        };
        let len = if max - min > tol {
            ((max - min) / step).round() as usize + 1
        } else {
            1
        };
        Self {
            name,
            min,
            step,
            len,
        }
    }

    fn index(&self, value: f64, line: usize) -> IsrResult<usize> {
        let pos = (value - self.min) / self.step;
        let idx = pos.round();
        if (pos - idx).abs() > SNAP_TOL {
            return Err(IsrError::Parse {
                line,
                reason: format!(
                    "{} = {value} is off the grid (step {})",
                    self.name, self.step
                ),
            });
        }
        Ok((idx as usize).min(self.len - 1))
    }
}

fn gridify(points: Vec<ScanPoint>, header: &ScanHeader) -> IsrResult<ScanGrid> {
    if points.is_empty() {
        return Err(IsrError::Parse {
            line: 0,
            reason: "scan contains no data points".to_string(),
        });
    }
    let mut xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let mut ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let x_axis = Axis::new("x", &mut xs, header.step_x);
    let y_axis = Axis::new("y", &mut ys, header.step_y);

    let cells = x_axis.len.saturating_mul(y_axis.len);
    if cells >= points.len().saturating_mul(2) && cells > 1 {
        return Err(IsrError::Parse {
            line: 0,
            reason: format!(
                "{} points cannot fill a {}x{} grid; hexagonal or irregular layouts are not supported",
                points.len(),
                y_axis.len,
                x_axis.len
            ),
        });
    }

    let mut orientations = Grid::filled(None, y_axis.len, x_axis.len)?;
    let mut quality = Grid::filled(f32::NAN, y_axis.len, x_axis.len)?;
    let mut occupied = Grid::filled(false, y_axis.len, x_axis.len)?;
    for point in points {
        let row = y_axis.index(point.y, point.line)?;
        let col = x_axis.index(point.x, point.line)?;
        if let Some(seen) = occupied.get_mut(row, col) {
            if *seen {
                return Err(IsrError::Parse {
                    line: point.line,
                    reason: format!("a second point maps to grid cell ({row}, {col})"),
                });
            }
            *seen = true;
        }
        if let Some(cell) = orientations.get_mut(row, col) {
            *cell = point.orientation;
        }
        if let Some(cell) = quality.get_mut(row, col) {
            *cell = point.quality;
        }
    }

    Ok(ScanGrid {
        orientations,
        quality,
        step_x: x_axis.step,
        step_y: y_axis.step,
    })
}
