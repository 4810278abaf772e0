use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Column '{column}' not found in {path}")]
    ColumnMissing { column: String, path: PathBuf },

    #[error("Unable to parse date: {0}")]
    DateParse(String),

    #[error("Invalid price '{value}' in column '{column}'")]
    InvalidPrice { column: String, value: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Data loading error: {0}")]
    DataLoadError(String),

    #[error("CSV parse error: {0}")]
    CsvError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BacktestError>;
