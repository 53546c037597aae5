//! Error types for trueno-pixel operations.
//!
//! Rendering itself never fails: degenerate triangles and truncated sample
//! grids degrade to "no coverage". Errors are reserved for invalid
//! construction inputs, configuration, and I/O.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-pixel operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Zoom factor that is not a positive finite number.
    #[error("Invalid scale: {0} (must be finite and greater than zero)")]
    InvalidScale(f32),

    /// Sample grid with a zero dimension or too many samples.
    #[error("Invalid sample grid: {rows}x{cols} (need 1 to 65536 samples per pixel)")]
    InvalidSampleGrid {
        /// Sample rows per pixel.
        rows: u32,
        /// Sample columns per pixel.
        cols: u32,
    },

    /// Scene or configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },
}

impl Error {
    /// Build a [`Error::ConfigParse`] from a YAML error, keeping its line.
    pub(crate) fn from_yaml(err: &serde_yaml_ng::Error) -> Self {
        Self::ConfigParse {
            line: err.location().map(|l| l.line()).unwrap_or(0),
            message: err.to_string(),
        }
    }
}
