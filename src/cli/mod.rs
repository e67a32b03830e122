//! Command Line Interface (CLI) layer for contactplot.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and batch
//! plotting. It wires user-provided options to the library functionality
//! exposed via `contactplot::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
