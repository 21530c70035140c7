use std::path::PathBuf;

use thiserror::Error;

/// Reasons a scan stack is rejected before any transform work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Stack has {rows} rows, which is not a multiple of the scan length {scan_length}")]
    InvalidScanGeometry { rows: usize, scan_length: usize },

    #[error("Scan length must be positive")]
    ZeroScanLength,

    #[error("Stack is empty ({rows}x{cols})")]
    EmptyStack { rows: usize, cols: usize },
}

/// Errors raised while reading or writing raster files.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Failed to access raster file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode raster file '{path}': {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to encode raster file '{path}': {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Unrecognized raster signature in '{path}', expected a binary graymap")]
    UnrecognizedFormat { path: PathBuf },

    #[error("Unsupported color type {color} in '{path}', expected 8- or 16-bit grayscale")]
    UnsupportedColorType { path: PathBuf, color: String },

    #[error("Raster file '{path}' is truncated: expected {expected} sample bytes, found {actual}")]
    Truncated {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("Raster {rows}x{cols} is too large to write to '{path}'")]
    DimensionsTooLarge {
        path: PathBuf,
        rows: usize,
        cols: usize,
    },
}
