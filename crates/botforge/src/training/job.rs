use super::{ExternalTrainer, ModelArtifact, ModelArtifacts, Result};
use crate::config::BotforgeConfig;
use crate::converter::{ConversionSummary, FormatConverter};
use crate::question_bank::{QuestionBank, QuestionStore};
use crate::storage::Storage;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// What a successful training run did
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub conversion: ConversionSummary,
    pub removed_models: Vec<ModelArtifact>,
    pub latest_model: Option<ModelArtifact>,
    pub cache_cleared: bool,
    pub duration: Duration,
}

/// One retraining cycle over the question bank
#[derive(Clone)]
pub struct TrainingJob {
    storage: Arc<dyn Storage>,
    store: QuestionStore,
    converter: FormatConverter,
    artifacts: ModelArtifacts,
    trainer: Arc<dyn ExternalTrainer>,
    config: BotforgeConfig,
}

impl TrainingJob {
    /// Create a new TrainingJob
    pub fn new(
        storage: Arc<dyn Storage>,
        trainer: Arc<dyn ExternalTrainer>,
        config: BotforgeConfig,
    ) -> Self {
        Self {
            store: QuestionStore::with_config(storage.clone(), config.clone()),
            converter: FormatConverter::new(storage.clone()),
            artifacts: ModelArtifacts::from_config(storage.clone(), &config),
            storage,
            trainer,
            config,
        }
    }

    /// Run one cycle: convert, train, rotate models, clear the cache
    ///
    /// Conversion and training failures abort the run before any artifact
    /// is touched. Cleanup failures are logged but do not fail the run.
    pub async fn run(&self) -> Result<TrainingReport> {
        info!("Starting model training process...");
        let started = Instant::now();

        self.storage.create_dir(&self.config.models_dir).await?;

        if !self.store.exists().await? {
            self.store.save(&QuestionBank::new()).await?;
            warn!(path = %self.config.questions_file, "Created new question bank");
        }

        info!("Converting question bank to NLU format...");
        let conversion = self
            .converter
            .try_convert(&self.config.questions_file, &self.config.nlu_file)
            .await?;

        info!(trainer = %self.trainer.describe(), "Training new model...");
        let dataset_path = self.config.resolve(&self.config.nlu_file);
        self.trainer.train(&dataset_path).await?;

        let removed_models = self.clear_old_models().await;
        let cache_cleared = self.clear_cache().await;

        let latest_model = match self.artifacts.latest().await {
            Ok(latest) => latest,
            Err(e) => {
                warn!("Failed to look up latest model: {}", e);
                None
            }
        };

        let duration = started.elapsed();
        info!(
            "Training completed in {:.2} seconds",
            duration.as_secs_f64()
        );

        Ok(TrainingReport {
            conversion,
            removed_models,
            latest_model,
            cache_cleared,
            duration,
        })
    }

    /// Run one cycle, logging instead of returning errors
    pub async fn train_model(&self) -> bool {
        match self.run().await {
            Ok(report) => {
                if let Some(model) = &report.latest_model {
                    info!(model = %model.path, "Latest model");
                }
                true
            }
            Err(e) => {
                error!("Training failed: {}", e);
                false
            }
        }
    }

    async fn clear_old_models(&self) -> Vec<ModelArtifact> {
        match self.artifacts.rotate(self.config.keep_models).await {
            Ok(removed) => removed,
            Err(e) => {
                error!("Failed to clear old models: {}", e);
                Vec::new()
            }
        }
    }

    async fn clear_cache(&self) -> bool {
        let cache_dir = &self.config.cache_dir;
        let result = async {
            if self.storage.exists(cache_dir).await? {
                self.storage.delete(cache_dir).await?;
                return Ok(true);
            }
            Ok::<_, crate::storage::StorageError>(false)
        }
        .await;

        match result {
            Ok(true) => {
                info!("Cleared training cache directory");
                true
            }
            Ok(false) => false,
            Err(e) => {
                error!("Failed to clear cache: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use crate::training::TrainerError;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Writes a new artifact on each successful call
    struct FakeTrainer {
        root: std::path::PathBuf,
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ExternalTrainer for FakeTrainer {
        async fn train(&self, dataset_path: &Path) -> std::result::Result<(), TrainerError> {
            assert!(dataset_path.exists());
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TrainerError::Other("boom".to_string()));
            }
            let models = self.root.join("models");
            std::fs::create_dir_all(&models).unwrap();
            let file = std::fs::File::create(models.join(format!("model-{n}.tar.gz"))).unwrap();
            file.set_modified(
                std::time::SystemTime::UNIX_EPOCH + Duration::from_secs(1_000 + n as u64),
            )
            .unwrap();
            std::fs::create_dir_all(self.root.join(".rasa/cache")).unwrap();
            Ok(())
        }
    }

    fn setup(fail: bool) -> (TempDir, Arc<FakeTrainer>, TrainingJob) {
        let dir = TempDir::new().unwrap();
        let trainer = Arc::new(FakeTrainer {
            root: dir.path().to_path_buf(),
            calls: AtomicUsize::new(0),
            fail,
        });
        let config = BotforgeConfig {
            base_dir: dir.path().to_string_lossy().to_string(),
            ..Default::default()
        };
        let storage = Arc::new(LocalStorage::from_config(&config));
        let job = TrainingJob::new(storage, trainer.clone(), config);
        (dir, trainer, job)
    }

    #[tokio::test]
    async fn test_creates_missing_question_bank() {
        let (dir, _trainer, job) = setup(false);

        let report = job.run().await.unwrap();
        assert_eq!(report.conversion.intents, 0);
        assert!(dir.path().join("data/questions.json").exists());
        assert!(dir.path().join("data/nlu.yml").exists());
    }

    #[tokio::test]
    async fn test_rotates_models_and_clears_cache() {
        let (dir, trainer, job) = setup(false);

        for _ in 0..4 {
            assert!(job.train_model().await);
        }

        assert_eq!(trainer.calls.load(Ordering::SeqCst), 4);
        let mut remaining: Vec<String> = std::fs::read_dir(dir.path().join("models"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        remaining.sort();
        assert_eq!(remaining, vec!["model-2.tar.gz", "model-3.tar.gz"]);
        assert!(!dir.path().join(".rasa").exists());
    }

    #[tokio::test]
    async fn test_report_contents() {
        let (_dir, _trainer, job) = setup(false);
        job.run().await.unwrap();
        job.run().await.unwrap();

        let report = job.run().await.unwrap();
        assert_eq!(report.removed_models.len(), 1);
        assert_eq!(report.removed_models[0].path, "models/model-0.tar.gz");
        assert_eq!(
            report.latest_model.map(|m| m.path),
            Some("models/model-2.tar.gz".to_string())
        );
        assert!(report.cache_cleared);
    }

    #[tokio::test]
    async fn test_trainer_failure_keeps_existing_models() {
        let (dir, trainer, job) = setup(true);
        std::fs::create_dir_all(dir.path().join("models")).unwrap();
        for name in ["a.tar.gz", "b.tar.gz", "c.tar.gz"] {
            std::fs::write(dir.path().join("models").join(name), b"model").unwrap();
        }

        assert!(!job.train_model().await);
        assert!(matches!(
            job.run().await,
            Err(crate::training::TrainingError::Trainer(_))
        ));
        assert_eq!(trainer.calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            std::fs::read_dir(dir.path().join("models")).unwrap().count(),
            3
        );
    }

    #[tokio::test]
    async fn test_conversion_failure_skips_training() {
        let (dir, trainer, job) = setup(false);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/questions.json"), b"{\"version\": \"1.0\"}").unwrap();

        assert!(matches!(
            job.run().await,
            Err(crate::training::TrainingError::Conversion(_))
        ));
        assert_eq!(trainer.calls.load(Ordering::SeqCst), 0);
    }
}
