//! Image encoders and the JSON metadata sidecar.
pub mod jpeg;
pub mod metadata;
pub mod png;
pub mod tiff;
