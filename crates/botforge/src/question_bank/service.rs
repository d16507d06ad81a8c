use super::{QuestionBank, QuestionBankError, Result};
use crate::config::BotforgeConfig;
use crate::converter::TrainingDataset;
use crate::storage::Storage;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

/// File-backed question store
///
/// Every successful addition rewrites both the question bank and the
/// generated training data in full.
#[derive(Clone)]
pub struct QuestionStore {
    storage: Arc<dyn Storage>,
    config: BotforgeConfig,
}

impl QuestionStore {
    /// Create a new QuestionStore
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_config(storage, BotforgeConfig::default())
    }

    /// Create a new QuestionStore with config
    pub fn with_config(storage: Arc<dyn Storage>, config: BotforgeConfig) -> Self {
        Self { storage, config }
    }

    /// Whether the question bank file exists
    pub async fn exists(&self) -> Result<bool> {
        Ok(self.storage.exists(&self.config.questions_file).await?)
    }

    /// Create the question bank and the training data file if missing
    pub async fn ensure_initialized(&self) -> Result<()> {
        if !self.storage.exists(&self.config.questions_file).await? {
            self.save(&QuestionBank::new()).await?;
            info!(path = %self.config.questions_file, "Created empty question bank");
        }

        if !self.storage.exists(&self.config.nlu_file).await? {
            let yaml = TrainingDataset::empty().to_yaml()?;
            self.storage
                .write(&self.config.nlu_file, yaml.as_bytes())
                .await?;
            info!(path = %self.config.nlu_file, "Created empty training data file");
        }

        Ok(())
    }

    /// Load the question bank
    pub async fn load(&self) -> Result<QuestionBank> {
        let content = self
            .storage
            .read(&self.config.questions_file)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    QuestionBankError::NotFound(self.config.questions_file.clone())
                } else {
                    e.into()
                }
            })?;

        serde_json::from_slice(&content).map_err(|e| {
            QuestionBankError::InvalidFormat(format!("{}: {}", self.config.questions_file, e))
        })
    }

    /// Persist the question bank
    pub async fn save(&self, bank: &QuestionBank) -> Result<()> {
        let json = serde_json::to_string_pretty(bank).map_err(|e| {
            QuestionBankError::SerializationError(format!(
                "Failed to serialize question bank: {}",
                e
            ))
        })?;

        self.storage
            .write(&self.config.questions_file, json.as_bytes())
            .await?;
        Ok(())
    }

    /// Add a question under an intent
    ///
    /// Returns `Ok(false)` for blank text or a case-insensitive duplicate.
    pub async fn add_question(
        &self,
        intent: &str,
        text: &str,
        confidence: Option<f64>,
    ) -> Result<bool> {
        let mut bank = self.load().await?;

        if !bank.add_example(intent, text, confidence) {
            debug!(intent, text, "Question rejected (blank or duplicate)");
            return Ok(false);
        }

        self.save(&bank).await?;
        self.regenerate_training_data(&bank).await?;

        info!(
            intent,
            total_examples = bank.metadata.total_examples,
            "Question added"
        );
        Ok(true)
    }

    /// All questions grouped by intent
    pub async fn get_all_questions(&self) -> Result<IndexMap<String, Vec<String>>> {
        Ok(self.load().await?.questions())
    }

    /// Rewrite the training data file from the given bank
    pub async fn regenerate_training_data(&self, bank: &QuestionBank) -> Result<()> {
        let value = serde_json::to_value(bank).map_err(|e| {
            QuestionBankError::SerializationError(format!(
                "Failed to serialize question bank: {}",
                e
            ))
        })?;

        let yaml = TrainingDataset::from_value(&value)?.to_yaml()?;
        self.storage
            .write(&self.config.nlu_file, yaml.as_bytes())
            .await?;
        Ok(())
    }
}
