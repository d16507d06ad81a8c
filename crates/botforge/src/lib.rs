//! Botforge: question bank, NLU conversion, scheduled retraining and a
//! multilingual canned-response action for intent-based chatbots.

pub mod app;
pub mod config;
pub mod converter;
pub mod error;
pub mod question_bank;
pub mod responder;
pub mod scheduler;
pub mod storage;
pub mod training;

// Re-export core types
pub use botforge_core::{
    CoreError, IntentPrediction, Processor, ProcessorMetadata, Request, RequestId,
    RequestMetadata, Response, ResponseMetadata, SlotSet,
};

pub use app::{BotforgeApp, BotforgeAppBuilder};
pub use config::{BotforgeConfig, TrainingCommandConfig};
pub use converter::{ConversionSummary, FormatConverter, TrainingDataset};
pub use question_bank::{QuestionBank, QuestionStore};
pub use responder::{Language, Resolution, ResponseResolver};
pub use scheduler::{Scheduler, SchedulerStats};
pub use storage::{LocalStorage, Storage};
pub use training::{CommandTrainer, ExternalTrainer, ModelArtifacts, TrainingJob, TrainingReport};

// Re-export error types
pub use error::{BotforgeError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::BotforgeApp;
    pub use crate::config::BotforgeConfig;
    pub use crate::storage::Storage;
    pub use botforge_core::{Processor, Request, Response};
}
