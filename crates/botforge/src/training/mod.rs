//! Retraining pipeline: convert, train, rotate artifacts, clear cache

pub mod artifacts;
pub mod error;
pub mod job;
pub mod trainer;

pub use artifacts::{ModelArtifact, ModelArtifacts};
pub use error::{Result, TrainerError, TrainingError};
pub use job::{TrainingJob, TrainingReport};
pub use trainer::{CommandTrainer, ExternalTrainer, TRAINING_DATA_ENV};
