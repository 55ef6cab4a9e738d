//! Reading scans and persisting match maps.
//!
//! The match map format is a plain comma-delimited matrix: one grid row per
//! line, each cell `0` or `1`, no header, every line terminated by `\n`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::grid::{Grid, MatchGrid};
use crate::trace::trace_event;
use crate::util::{IsrError, IsrResult};

pub mod scan;

pub use scan::{parse_scan, read_scan, ScanColumns, ScanGrid};

/// Default base name of the persisted match map.
pub const DEFAULT_OUT_FILE: &str = "isr_map";

/// Returns `<out_dir>/<out_file>.txt`.
pub fn match_map_path<P: AsRef<Path>>(out_dir: P, out_file: &str) -> PathBuf {
    out_dir.as_ref().join(format!("{out_file}.txt"))
}

/// Formats a match map as comma-delimited `0`/`1` text.
pub fn format_match_map(map: &MatchGrid) -> String {
    let mut out = String::with_capacity(map.rows() * (map.cols() * 2));
    for row in map.iter_rows() {
        for (col, &cell) in row.iter().enumerate() {
            if col > 0 {
                out.push(',');
            }
            out.push(if cell { '1' } else { '0' });
        }
        out.push('\n');
    }
    out
}

/// Writes a match map to `path`, replacing any existing file.
pub fn write_match_map<P: AsRef<Path>>(path: P, map: &MatchGrid) -> IsrResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| IsrError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(format_match_map(map).as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|err| IsrError::io(path, err))?;
    trace_event!("match_map_written", rows = map.rows(), cols = map.cols());
    Ok(())
}

/// Parses comma-delimited `0`/`1` text back into a match map.
pub fn parse_match_map(text: &str) -> IsrResult<MatchGrid> {
    let mut data = Vec::new();
    let mut cols = None;
    let mut rows = 0usize;
    for (idx, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let before = data.len();
        for cell in line.split(',') {
            let value = match cell.trim() {
                "0" => false,
                "1" => true,
                other => {
                    return Err(IsrError::Parse {
                        line: idx + 1,
                        reason: format!("expected 0 or 1, got `{other}`"),
                    })
                }
            };
            data.push(value);
        }
        let width = data.len() - before;
        match cols {
            None => cols = Some(width),
            Some(expected) if expected != width => {
                return Err(IsrError::Parse {
                    line: idx + 1,
                    reason: format!("expected {expected} cells, got {width}"),
                })
            }
            Some(_) => {}
        }
        rows += 1;
    }
    Grid::new(data, rows, cols.unwrap_or(0))
}

/// Reads a match map written by `write_match_map`.
pub fn read_match_map<P: AsRef<Path>>(path: P) -> IsrResult<MatchGrid> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|err| IsrError::io(path, err))?;
    parse_match_map(&text)
}
