//! Helpers shared by the integration tests.

use std::path::{Path, PathBuf};

pub const SAMPLE_DAT: &str = "tests/data/contact_matrix.dat";

/// Absolute path of the bundled sample matrix.
#[allow(dead_code)]
pub fn sample_dat() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(SAMPLE_DAT)
}

/// Assert that `path` exists and is not empty.
#[allow(dead_code)]
pub fn assert_nonempty_file(path: &Path) {
    let meta = std::fs::metadata(path)
        .unwrap_or_else(|e| panic!("{} is missing: {}", path.display(), e));
    assert!(meta.len() > 0, "{} is empty", path.display());
}
