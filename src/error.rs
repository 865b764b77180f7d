use std::path::{Path, PathBuf};
use thiserror::Error;

pub type ExcelResult<T> = Result<T, ExcelError>;

#[derive(Error, Debug)]
pub enum ExcelError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported file format: {extension:?} (expected .xlsx, .xlsm, .xltx, .xltm or .csv)")]
    UnsupportedFormat { extension: String },

    #[error("IO error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("No headers found in {0}")]
    MissingHeader(String),

    #[error("Sheet {sheet:?} not found in {}", path.display())]
    SheetNotFound { sheet: String, path: PathBuf },
}

impl ExcelError {
    /// Wrap an underlying I/O or codec failure with the path it happened on
    pub fn io(path: &Path, cause: impl std::fmt::Display) -> Self {
        ExcelError::Io {
            path: path.to_path_buf(),
            message: cause.to_string(),
        }
    }
}
