use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::io::dat::ContactMatrix;
use crate::types::{Colormap, OutputFormat};

/// Description of a rendered heatmap, written next to the image as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotMetadata {
    pub source: Option<PathBuf>,
    pub image: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub cols: usize,
    pub column_labels: Vec<String>,
    pub row_labels: Vec<String>,
    pub vmin: f64,
    pub vmax: f64,
    pub colormap: Colormap,
    pub created: DateTime<Utc>,
}

impl PlotMetadata {
    pub fn new(
        source: Option<&Path>,
        image: &Path,
        format: OutputFormat,
        (width, height): (u32, u32),
        matrix: &ContactMatrix,
        (vmin, vmax): (f64, f64),
        colormap: Colormap,
    ) -> Self {
        Self {
            source: source.map(Path::to_path_buf),
            image: image.to_path_buf(),
            format,
            width,
            height,
            rows: matrix.n_rows(),
            cols: matrix.n_cols(),
            column_labels: matrix.column_labels.clone(),
            row_labels: matrix.row_labels.clone(),
            vmin,
            vmax,
            colormap,
            created: Utc::now(),
        }
    }
}

/// Sidecar path for an image: same stem, `.json` extension.
pub fn sidecar_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("json")
}

pub fn write_metadata_sidecar(output_path: &Path, metadata: &PlotMetadata) -> Result<PathBuf> {
    let sidecar = sidecar_path(output_path);
    let json_string = serde_json::to_string_pretty(metadata)?;
    std::fs::write(&sidecar, json_string)?;
    info!("Created metadata sidecar: {:?}", sidecar);
    Ok(sidecar)
}
