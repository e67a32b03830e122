//! Tests of the binary application.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::{assert_nonempty_file, sample_dat};

#[test]
fn test_bin_default_output_name() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("contactplot")
        .unwrap()
        .current_dir(dir.path())
        .arg(sample_dat())
        .args(["--size", "800x600"])
        .assert()
        .success()
        .stdout("");

    assert_nonempty_file(&dir.path().join("contact.png"));
}

#[test]
fn test_bin_full_size_default() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("contactplot")
        .unwrap()
        .current_dir(dir.path())
        .arg(sample_dat())
        .assert()
        .success();

    let img = image::open(dir.path().join("contact.png")).unwrap();
    assert_eq!((img.width(), img.height()), (3200, 2400));
}

#[test]
fn test_bin_no_arguments_prints_usage() {
    Command::cargo_bin("contactplot")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_bin_two_arguments_prints_usage() {
    Command::cargo_bin("contactplot")
        .unwrap()
        .args(["a.dat", "b.dat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_bin_malformed_input_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.dat");
    std::fs::write(&input, "       a b\nx 0.1 zero\n").unwrap();

    Command::cargo_bin("contactplot")
        .unwrap()
        .current_dir(dir.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("zero"));

    assert!(!dir.path().join("contact.png").exists());
}

#[test]
fn test_bin_oversized_canvas_is_refused() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("contactplot")
        .unwrap()
        .current_dir(dir.path())
        .arg(sample_dat())
        .args(["--size", "4294967295x4294967295"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("65535"));

    assert!(!dir.path().join("contact.png").exists());
}

#[test]
fn test_bin_options_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("plot.tiff");
    Command::cargo_bin("contactplot")
        .unwrap()
        .arg(sample_dat())
        .arg("-o")
        .arg(&out)
        .args([
            "--size",
            "1000x700",
            "--colormap",
            "magma",
            "--vmin",
            "0",
            "--vmax",
            "50",
            "--metadata",
        ])
        .assert()
        .success();

    assert_nonempty_file(&out);
    let sidecar = std::fs::read_to_string(dir.path().join("plot.json")).unwrap();
    assert!(sidecar.contains("\"colormap\": \"magma\""));
    assert!(sidecar.contains("\"format\": \"tiff\""));
}

#[test]
fn test_bin_batch_mode() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::copy(sample_dat(), input.path().join("run1.dat")).unwrap();

    Command::cargo_bin("contactplot")
        .unwrap()
        .arg("--input-dir")
        .arg(input.path())
        .arg("--output-dir")
        .arg(output.path())
        .args(["--format", "jpeg", "--size", "640x480"])
        .assert()
        .success();

    assert_nonempty_file(&output.path().join("run1.jpg"));
}
