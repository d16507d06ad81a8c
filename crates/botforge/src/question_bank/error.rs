use thiserror::Error;

/// Question bank related errors
#[derive(Error, Debug)]
pub enum QuestionBankError {
    #[error("Question bank not found: {0}")]
    NotFound(String),

    #[error("Invalid question bank format: {0}")]
    InvalidFormat(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Training data error: {0}")]
    TrainingData(#[from] crate::converter::ConvertError),
}

/// Result type for question bank operations
pub type Result<T> = std::result::Result<T, QuestionBankError>;
