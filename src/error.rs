//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O and encoder errors, and provides semantic variants
//! for malformed `.dat` input and rendering failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JPEG encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("TIFF encoding error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Line {line}: could not parse '{token}' as a number")]
    Parse { line: usize, token: String },

    #[error("Line {line}: expected {expected} values, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Header lists {header} labels but rows contain {values} values")]
    HeaderMismatch { header: usize, values: usize },

    #[error("No data rows found in input")]
    EmptyMatrix,

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Canvas {width}x{height} is too small for a {rows}x{cols} heatmap")]
    CanvasTooSmall {
        width: u32,
        height: u32,
        rows: usize,
        cols: usize,
    },

    #[error("{input:?} would overwrite {output:?}, already written in this batch")]
    DuplicateOutput { input: PathBuf, output: PathBuf },

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn processing<E: std::fmt::Display>(e: E) -> Self {
        Error::Processing(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_errors_are_not_labelled_as_png() {
        let err: Error = image::ImageError::IoError(std::io::Error::other("truncated")).into();
        assert_eq!(err.to_string(), "Image error: truncated");
    }
}
