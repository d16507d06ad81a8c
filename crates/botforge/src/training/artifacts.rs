use crate::config::BotforgeConfig;
use crate::storage::{Storage, StorageResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// A packaged model produced by one training run
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    /// Path relative to the storage root
    pub path: String,
    pub modified: DateTime<Utc>,
    pub size: u64,
}

/// Catalogue of model artifacts in the models directory
#[derive(Clone)]
pub struct ModelArtifacts {
    storage: Arc<dyn Storage>,
    models_dir: String,
    extension: String,
}

impl ModelArtifacts {
    pub fn new(
        storage: Arc<dyn Storage>,
        models_dir: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            models_dir: models_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(storage: Arc<dyn Storage>, config: &BotforgeConfig) -> Self {
        Self::new(
            storage,
            config.models_dir.clone(),
            config.model_extension.clone(),
        )
    }

    /// Artifacts newest first; empty if the directory does not exist
    pub async fn list(&self) -> StorageResult<Vec<ModelArtifact>> {
        let mut artifacts = Vec::new();

        for path in self.storage.list(&self.models_dir).await? {
            if path.ends_with('/') || !path.ends_with(&self.extension) {
                continue;
            }

            let metadata = self.storage.metadata(&path).await?;
            artifacts.push(ModelArtifact {
                path,
                modified: metadata.modified.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
                size: metadata.size,
            });
        }

        artifacts.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.path.cmp(&a.path))
        });
        Ok(artifacts)
    }

    /// Most recently modified artifact
    pub async fn latest(&self) -> StorageResult<Option<ModelArtifact>> {
        Ok(self.list().await?.into_iter().next())
    }

    /// Delete everything but the `keep` newest artifacts, returning what was removed
    pub async fn rotate(&self, keep: usize) -> StorageResult<Vec<ModelArtifact>> {
        let stale: Vec<ModelArtifact> = self.list().await?.into_iter().skip(keep).collect();

        for artifact in &stale {
            self.storage.delete(&artifact.path).await?;
            info!(model = %artifact.path, "Removed old model");
        }

        Ok(stale)
    }
}
