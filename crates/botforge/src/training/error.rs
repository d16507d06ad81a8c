use std::time::Duration;
use thiserror::Error;

/// Failures of the external training command
#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Training command failed with {0}")]
    ExitStatus(std::process::ExitStatus),

    #[error("Failed waiting for training command: {0}")]
    Wait(#[source] std::io::Error),

    #[error("Training command timed out after {0:?}")]
    Timeout(Duration),

    #[error("Training backend error: {0}")]
    Other(String),
}

/// Failures of a training run
#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("Question bank error: {0}")]
    QuestionBank(#[from] crate::question_bank::QuestionBankError),

    #[error("Conversion failed: {0}")]
    Conversion(#[from] crate::converter::ConvertError),

    #[error("Training failed: {0}")]
    Trainer(#[from] TrainerError),

    #[error("Storage error: {0}")]
    StorageError(#[from] crate::storage::StorageError),
}

pub type Result<T> = std::result::Result<T, TrainingError>;
