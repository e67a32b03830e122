//! High-level, ergonomic library API: plot a `.dat` file to an image on disk,
//! render to in-memory buffers, and batch helpers for directories. Prefer these
//! entrypoints over the low-level processing modules when embedding contactplot.
use std::collections::HashSet;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::params::PlotParams;
use crate::core::processing::render::render_heatmap;
use crate::core::processing::save::{encode_image, save_rendered_image};
use crate::error::{Error, Result};
use crate::io::dat::{ContactMatrix, read_dat_file};
use crate::io::writers::metadata::{PlotMetadata, write_metadata_sidecar};
use crate::types::OutputFormat;

/// Summary of one rendered plot
#[derive(Debug, Clone, PartialEq)]
pub struct PlotReport {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub cols: usize,
    pub vmin: f64,
    pub vmax: f64,
    pub sidecar: Option<PathBuf>,
}

/// Read and parse a `.dat` contact matrix
pub fn read_contact_matrix(input: &Path) -> Result<ContactMatrix> {
    read_dat_file(input)
}

/// Render and encode a matrix in memory (no disk I/O)
pub fn render_to_buffer(
    matrix: &ContactMatrix,
    params: &PlotParams,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    let rendered = render_heatmap(matrix, params)?;
    let mut cursor = Cursor::new(Vec::new());
    encode_image(&mut cursor, &rendered.image, format)?;
    Ok(cursor.into_inner())
}

/// Render an already parsed matrix to `output`. `source` is only recorded in
/// the metadata sidecar.
pub fn plot_matrix_to_path(
    matrix: &ContactMatrix,
    source: Option<&Path>,
    output: &Path,
    params: &PlotParams,
) -> Result<PlotReport> {
    let format = params.resolve_format(output);
    let rendered = render_heatmap(matrix, params)?;
    save_rendered_image(&rendered.image, output, format)?;

    let sidecar = if params.metadata {
        let meta = PlotMetadata::new(
            source,
            output,
            format,
            rendered.image.dimensions(),
            matrix,
            (rendered.vmin, rendered.vmax),
            params.colormap,
        );
        Some(write_metadata_sidecar(output, &meta)?)
    } else {
        None
    };

    Ok(PlotReport {
        output: output.to_path_buf(),
        format,
        width: rendered.image.width(),
        height: rendered.image.height(),
        rows: matrix.n_rows(),
        cols: matrix.n_cols(),
        vmin: rendered.vmin,
        vmax: rendered.vmax,
        sidecar,
    })
}

/// Plot a `.dat` file to an image at `output` using `params`
pub fn plot_dat_to_path(input: &Path, output: &Path, params: &PlotParams) -> Result<PlotReport> {
    let matrix = read_contact_matrix(input)?;
    info!(
        "Loaded {:?}: {} rows x {} columns",
        input,
        matrix.n_rows(),
        matrix.n_cols()
    );
    plot_matrix_to_path(&matrix, Some(input), output, params)
}

/// Batch processing report. `skipped` counts directory entries that are not `.dat` files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// `.dat` files directly inside `input_dir`, sorted by name
pub fn iterate_dat_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        let is_dat = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("dat"));
        if path.is_file() && is_dat {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Plot every `.dat` file in `input_dir` into `output_dir`, naming each image
/// after its input stem. An input whose image name was already written in
/// this batch (`run.dat` after `run.DAT`) is an error. If `continue_on_error`
/// is true, failures are counted in the report and processing continues;
/// otherwise, the first error is returned.
pub fn plot_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &PlotParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    std::fs::create_dir_all(output_dir)?;
    let format = params.format.unwrap_or_default();
    let files = iterate_dat_files(input_dir)?;
    let entries = std::fs::read_dir(input_dir)?.count();
    let mut report = BatchReport {
        skipped: entries.saturating_sub(files.len()),
        ..BatchReport::default()
    };

    let mut written: HashSet<PathBuf> = HashSet::new();
    for path in files {
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));
        let file_params = PlotParams {
            format: Some(format),
            ..params.clone()
        };

        info!("Processing: {:?} -> {:?}", path, output_path);
        let result = if written.contains(&output_path) {
            Err(Error::DuplicateOutput {
                input: path.clone(),
                output: output_path.clone(),
            })
        } else {
            plot_dat_to_path(&path, &output_path, &file_params)
        };
        match result {
            Ok(_) => {
                report.processed += 1;
                written.insert(output_path);
            }
            Err(e) => {
                report.errors += 1;
                warn!("Error processing {:?}: {}", path, e);
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    if report.processed == 0 && report.errors == 0 {
        warn!("No .dat files found in {:?}", input_dir);
    }
    Ok(report)
}
