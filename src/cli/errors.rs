use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid size parameter: {size}. Expected WIDTHxHEIGHT, e.g. 3200x2400")]
    InvalidSize { size: String },

    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("{errors} of {total} files failed to plot")]
    BatchFailed { errors: usize, total: usize },

    #[error(transparent)]
    Plot(#[from] contactplot::Error),
}
