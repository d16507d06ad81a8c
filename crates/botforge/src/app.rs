//! Application layer wiring storage, question bank, training and responder

use crate::config::BotforgeConfig;
use crate::converter::FormatConverter;
use crate::error::{BotforgeError, Result};
use crate::question_bank::QuestionStore;
use crate::responder::{LanguageDetector, ResponseResolver};
use crate::scheduler::{IntervalTicker, Scheduler};
use crate::storage::{LocalStorage, Storage};
use crate::training::{CommandTrainer, ExternalTrainer, ModelArtifacts, TrainingJob};
use botforge_core::{Processor, Request, Response};
use std::path::Path;
use std::sync::Arc;

/// A configured bot workspace
#[derive(Clone)]
pub struct BotforgeApp {
    config: BotforgeConfig,
    storage: Arc<dyn Storage>,
    trainer: Arc<dyn ExternalTrainer>,
    detector: Option<Arc<dyn LanguageDetector>>,
}

impl BotforgeApp {
    /// Create an app on local storage with the configured training command
    pub fn new(config: BotforgeConfig) -> Self {
        Self::builder(config).build()
    }

    /// Create an app from a JSON or TOML configuration file
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = BotforgeConfig::load_from_file(path)
            .map_err(|e| BotforgeError::Config(format!("{}: {:#}", path.display(), e)))?;
        Ok(Self::new(config))
    }

    /// Create a new builder
    pub fn builder(config: BotforgeConfig) -> BotforgeAppBuilder {
        BotforgeAppBuilder::new(config)
    }

    pub fn config(&self) -> &BotforgeConfig {
        &self.config
    }

    pub fn storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub fn question_store(&self) -> QuestionStore {
        QuestionStore::with_config(self.storage.clone(), self.config.clone())
    }

    pub fn converter(&self) -> FormatConverter {
        FormatConverter::new(self.storage.clone())
    }

    pub fn artifacts(&self) -> ModelArtifacts {
        ModelArtifacts::from_config(self.storage.clone(), &self.config)
    }

    pub fn training_job(&self) -> TrainingJob {
        TrainingJob::new(
            self.storage.clone(),
            self.trainer.clone(),
            self.config.clone(),
        )
    }

    /// Scheduler retraining every configured interval
    pub fn scheduler(&self) -> Scheduler<TrainingJob, IntervalTicker> {
        Scheduler::every(Arc::new(self.training_job()), self.config.interval())
    }

    pub fn resolver(&self) -> ResponseResolver {
        let resolver = ResponseResolver::new(self.storage.clone(), &self.config);
        match &self.detector {
            Some(detector) => resolver.with_detector(detector.clone()),
            None => resolver,
        }
    }

    /// Validate a host request and answer it with the resolver
    pub async fn respond(&self, request: Request) -> Result<Response> {
        request.validate()?;
        Ok(self.resolver().process(request).await?)
    }
}

/// Builder for [`BotforgeApp`]
pub struct BotforgeAppBuilder {
    config: BotforgeConfig,
    storage: Option<Arc<dyn Storage>>,
    trainer: Option<Arc<dyn ExternalTrainer>>,
    detector: Option<Arc<dyn LanguageDetector>>,
}

impl BotforgeAppBuilder {
    pub fn new(config: BotforgeConfig) -> Self {
        Self {
            config,
            storage: None,
            trainer: None,
            detector: None,
        }
    }

    /// Use a custom storage backend
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Use a custom trainer
    pub fn trainer(mut self, trainer: Arc<dyn ExternalTrainer>) -> Self {
        self.trainer = Some(trainer);
        self
    }

    /// Use a custom language detector
    pub fn detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn build(self) -> BotforgeApp {
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(LocalStorage::from_config(&self.config)));
        let trainer = self
            .trainer
            .unwrap_or_else(|| Arc::new(CommandTrainer::from_config(&self.config)));

        BotforgeApp {
            config: self.config,
            storage,
            trainer,
            detector: self.detector,
        }
    }
}
