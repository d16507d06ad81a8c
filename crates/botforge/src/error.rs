//! Error types for botforge crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotforgeError {
    #[error("Core error: {0}")]
    Core(#[from] botforge_core::CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    #[error("Question bank error: {0}")]
    QuestionBank(#[from] crate::question_bank::QuestionBankError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] crate::converter::ConvertError),

    #[error("Training error: {0}")]
    Training(#[from] crate::training::TrainingError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BotforgeError>;
