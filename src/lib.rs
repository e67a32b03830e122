#![doc = r#"
contactplot — heatmaps for `contact` matrices.

`contact` computes, for two atom selections A and B, the fraction of
trajectory frames in which each pair of atoms is within a cut-off distance,
and writes the result as a whitespace-delimited `.dat` matrix. This crate
parses that file and renders it as a heatmap image with labelled axes and a
colorbar. It powers the `contactplot` CLI and can be embedded in your own
Rust applications.

Input format
------------
```text
# Generated with contact (C Contact Matrix Calculator) v2022/08/30.
# Command line: contact -c system.gro -a name CA -b name CB
            1      2      3
     10  0.250  0.000  1.000
     11  0.000  0.500  0.125
```
Lines starting with `#` and blank lines are ignored. The line starting with
seven spaces carries the column labels (selection A). Every other line is a
row label (selection B) followed by contact fractions, which are plotted as
percentages.

Quick start: plot a file
------------------------
```rust,no_run
use std::path::Path;
use contactplot::{plot_dat_to_path, Colormap, PlotParams};

fn main() -> contactplot::Result<()> {
    let params = PlotParams {
        colormap: Colormap::Inferno,
        ..PlotParams::default()
    };
    let report = plot_dat_to_path(
        Path::new("contact_matrix.dat"),
        Path::new("contact.png"),
        &params,
    )?;
    println!("{}x{} image, range {}..{}", report.width, report.height, report.vmin, report.vmax);
    Ok(())
}
```

Render in memory
----------------
```rust
use contactplot::{parse_dat_str, render_to_buffer, OutputFormat, PlotParams};

fn main() -> contactplot::Result<()> {
    let matrix = parse_dat_str("       1 2\n10 0.1 0.9\n11 0.4 0.0\n")?;
    let params = PlotParams { width: 640, height: 480, ..PlotParams::default() };
    let png = render_to_buffer(&matrix, &params, OutputFormat::Png)?;
    assert!(!png.is_empty());
    Ok(())
}
```

Error handling
--------------
All public functions return `contactplot::Result<T>`; match on
`contactplot::Error` to handle specific cases, e.g. malformed input rows.

Useful modules
--------------
- [`api`] — high-level entry points.
- [`types`] — `Colormap`, `OutputFormat`.
- [`io`] — `.dat` reader and image/metadata writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::PlotParams;
pub use crate::core::processing::render::{RenderedHeatmap, render_heatmap};
pub use error::{Error, Result};
pub use types::{Colormap, OutputFormat};

// Reader
pub use io::dat::{ContactMatrix, parse_dat_str, read_dat_file};

// Writer helpers
pub use io::writers::metadata::{PlotMetadata, write_metadata_sidecar};

// High-level API re-exports
pub use api::{
    BatchReport, PlotReport, iterate_dat_files, plot_dat_to_path, plot_directory_to_path,
    plot_matrix_to_path, read_contact_matrix, render_to_buffer,
};
