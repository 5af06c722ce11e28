use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

/// Fatal errors raised while loading the input files.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Input file does not exist
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// File exists but could not be read as CSV
    #[error("Failed to read '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },

    /// A required column is absent from the header
    #[error("Missing required column '{column}' in '{}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A date cell could not be parsed
    #[error("Invalid date '{value}' at data row {row} of '{}'", path.display())]
    InvalidDate {
        path: PathBuf,
        row: usize,
        value: String,
    },

    /// A product id is empty or a required number is not numeric
    #[error("Invalid value in column '{column}' at data row {row} of '{}'", path.display())]
    InvalidValue {
        path: PathBuf,
        column: String,
        row: usize,
    },
}

impl LoadError {
    pub(crate) fn read(path: &std::path::Path, source: polars::error::PolarsError) -> Self {
        let err = LoadError::Read {
            path: path.to_path_buf(),
            message: source.to_string(),
        };
        error!(?err, "CSV read error");
        err
    }
}

/// Type alias for Result with LoadError
pub type Result<T> = std::result::Result<T, LoadError>;
