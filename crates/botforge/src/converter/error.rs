use thiserror::Error;

/// Training data conversion errors
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid question bank structure: {0}")]
    Structural(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
