//! Error types for isrmap.

use thiserror::Error;

/// Result alias for isrmap operations.
pub type IsrResult<T> = std::result::Result<T, IsrError>;

/// Errors that can occur when loading scans, computing ISR, or writing maps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsrError {
    /// A grid does not have the same shape as the comparison grid.
    #[error(
        "invalid input shape: {name} is {rows}x{cols}, expected {expected_rows}x{expected_cols}"
    )]
    InvalidInputShape {
        name: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
    /// Grid dimensions are zero or overflow.
    #[error("invalid grid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    /// The backing buffer length does not equal `rows * cols`.
    #[error("buffer size mismatch: needed {needed}, got {got}")]
    BufferSizeMismatch { needed: usize, got: usize },
    /// A configuration value is out of range or unrecognized.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {reason}")]
    Io { path: String, reason: String },
    /// A line of scan text could not be parsed.
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl IsrError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}
