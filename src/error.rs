use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Schema error in '{field}': {message}")]
    Schema { field: String, message: String },

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("File '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("Cannot impute column '{column}': no values present to compute a mean")]
    EmptyColumn { column: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Missing required data: {0}")]
    MissingData(String),
}

impl ProcessingError {
    pub fn schema(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProcessingError::Schema {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ProcessingError::NotFound { path: path.into() }
    }
}
