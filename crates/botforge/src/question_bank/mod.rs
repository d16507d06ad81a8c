pub mod entity;
pub mod error;
pub mod service;

pub use entity::{
    BankMetadata, Example, IntentEntry, IntentMetadata, QUESTION_BANK_VERSION, QuestionBank,
    USER_SOURCE, normalize,
};
pub use error::{QuestionBankError, Result};
pub use service::QuestionStore;
