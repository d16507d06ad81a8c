use super::{Result, TrainingDataset};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{error, info};

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Intents written to the training data
    pub intents: usize,
    /// Example lines written
    pub examples: usize,
    /// SHA-256 of the written document
    pub digest: String,
}

/// Converts a question bank file into an NLU training data file
#[derive(Clone)]
pub struct FormatConverter {
    storage: Arc<dyn Storage>,
}

impl FormatConverter {
    /// Create a new FormatConverter
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read `source`, convert it and write the result to `destination`
    pub async fn try_convert(&self, source: &str, destination: &str) -> Result<ConversionSummary> {
        info!(source, "Reading question bank");
        let content = self.storage.read(source).await?;
        let document: serde_json::Value = serde_json::from_slice(&content)?;

        let dataset = TrainingDataset::from_value(&document)?;
        let yaml = dataset.to_yaml()?;

        info!(destination, "Writing training data");
        self.storage.write(destination, yaml.as_bytes()).await?;

        Ok(ConversionSummary {
            intents: dataset.nlu.len(),
            examples: dataset.example_count(),
            digest: sha256::digest(yaml.as_bytes()),
        })
    }

    /// Same as [`try_convert`](Self::try_convert), reporting only success
    pub async fn convert(&self, source: &str, destination: &str) -> bool {
        match self.try_convert(source, destination).await {
            Ok(summary) => {
                info!(
                    intents = summary.intents,
                    examples = summary.examples,
                    "Conversion completed"
                );
                true
            }
            Err(e) => {
                error!("Conversion error: {}", e);
                false
            }
        }
    }
}
