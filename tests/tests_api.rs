//! Tests of the library API.

mod common;

use std::path::Path;

use common::{assert_nonempty_file, sample_dat};
use contactplot::{
    Colormap, Error, OutputFormat, PlotMetadata, PlotParams, plot_dat_to_path,
    plot_directory_to_path, read_contact_matrix, render_to_buffer,
};

fn small_params() -> PlotParams {
    PlotParams {
        width: 900,
        height: 600,
        ..PlotParams::default()
    }
}

#[test]
fn sample_matrix_is_parsed() {
    let m = read_contact_matrix(&sample_dat()).unwrap();
    assert_eq!(m.column_labels, vec!["1", "13", "25", "37", "49", "61"]);
    assert_eq!(m.row_labels, vec!["1001", "1002", "1003", "1004"]);
    assert_eq!(m.values.dim(), (4, 6));
    assert_eq!(m.values[[2, 3]], 100.0);
    assert_eq!(m.value_range(), Some((0.0, 100.0)));
}

#[test]
fn plot_writes_png_of_requested_size() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("contact.png");

    let report = plot_dat_to_path(&sample_dat(), &out, &small_params()).unwrap();
    assert_eq!(report.format, OutputFormat::Png);
    assert_eq!((report.width, report.height), (900, 600));
    assert_eq!((report.rows, report.cols), (4, 6));
    assert_eq!(report.sidecar, None);
    assert_nonempty_file(&out);

    let decoded = image::open(&out).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (900, 600));
}

#[test]
fn format_follows_output_extension() {
    let dir = tempfile::tempdir().unwrap();
    for (name, format) in [
        ("contact.jpg", OutputFormat::Jpeg),
        ("contact.tiff", OutputFormat::Tiff),
    ] {
        let out = dir.path().join(name);
        let report = plot_dat_to_path(&sample_dat(), &out, &small_params()).unwrap();
        assert_eq!(report.format, format);
        assert_nonempty_file(&out);
    }
}

#[test]
fn metadata_sidecar_describes_plot() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("contact.png");
    let params = PlotParams {
        metadata: true,
        colormap: Colormap::Viridis,
        vmax: Some(80.0),
        ..small_params()
    };

    let report = plot_dat_to_path(&sample_dat(), &out, &params).unwrap();
    let sidecar = report.sidecar.unwrap();
    assert_eq!(sidecar, dir.path().join("contact.json"));

    let meta: PlotMetadata =
        serde_json::from_str(&std::fs::read_to_string(&sidecar).unwrap()).unwrap();
    assert_eq!(meta.rows, 4);
    assert_eq!(meta.cols, 6);
    assert_eq!(meta.vmin, 0.0);
    assert_eq!(meta.vmax, 80.0);
    assert_eq!(meta.colormap, Colormap::Viridis);
    assert_eq!(meta.source.as_deref(), Some(sample_dat().as_path()));
}

#[test]
fn in_memory_render_matches_png_signature() {
    let m = read_contact_matrix(&sample_dat()).unwrap();
    let bytes = render_to_buffer(&m, &small_params(), OutputFormat::Png).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let res = plot_dat_to_path(
        Path::new("does/not/exist.dat"),
        &dir.path().join("x.png"),
        &small_params(),
    );
    assert!(matches!(res, Err(Error::Io(_))));
    assert!(!dir.path().join("x.png").exists());
}

#[test]
fn batch_plots_every_dat_file() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::copy(sample_dat(), input.path().join("first.dat")).unwrap();
    std::fs::copy(sample_dat(), input.path().join("second.DAT")).unwrap();
    std::fs::write(input.path().join("notes.txt"), "not a matrix").unwrap();
    std::fs::write(input.path().join("broken.dat"), "x 0.1\ny 0.1 0.2\n").unwrap();

    let params = PlotParams {
        format: Some(OutputFormat::Png),
        ..small_params()
    };

    // stops at the first failure ("broken" sorts first)
    assert!(plot_directory_to_path(input.path(), output.path(), &params, false).is_err());

    let report = plot_directory_to_path(input.path(), output.path(), &params, true).unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.errors, 1);
    assert_eq!(report.skipped, 1);
    assert_nonempty_file(&output.path().join("first.png"));
    assert_nonempty_file(&output.path().join("second.png"));
    assert!(!output.path().join("broken.png").exists());
}

#[test]
fn batch_refuses_to_overwrite_a_shared_stem() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::copy(sample_dat(), input.path().join("run.DAT")).unwrap();
    std::fs::write(input.path().join("run.dat"), "       1\n10 0.5\n").unwrap();

    let params = PlotParams {
        format: Some(OutputFormat::Png),
        ..small_params()
    };

    // "run.DAT" sorts first and owns run.png
    let res = plot_directory_to_path(input.path(), output.path(), &params, false);
    assert!(matches!(res, Err(Error::DuplicateOutput { .. })));

    let report = plot_directory_to_path(input.path(), output.path(), &params, true).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, 1);

    let png = image::open(output.path().join("run.png")).unwrap();
    assert_eq!(png.width(), small_params().width);
    assert!(!output.path().join("run.json").exists());
}
