//! I/O layer: the `.dat` contact-matrix reader and `writers` for
//! PNG/JPEG/TIFF outputs and the JSON metadata sidecar.
pub mod dat;
pub use dat::{ContactMatrix, parse_dat_str, read_dat_file};

pub mod writers;
