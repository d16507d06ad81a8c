//! Error types for botforge-cli

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Botforge(#[from] botforge::BotforgeError),

    #[error("Storage error: {0}")]
    Storage(#[from] botforge::storage::StorageError),

    #[error("Question bank error: {0}")]
    QuestionBank(#[from] botforge::question_bank::QuestionBankError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] botforge::converter::ConvertError),

    #[error("Training error: {0}")]
    Training(#[from] botforge::training::TrainingError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
