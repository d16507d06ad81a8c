use super::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Training data format version understood by the NLU framework
pub const NLU_FORMAT_VERSION: &str = "3.1";

/// One intent block of the training data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NluEntry {
    pub intent: String,
    /// Newline-joined `- <text>` lines
    pub examples: String,
}

/// Training data document, derived from a question bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDataset {
    pub version: String,
    pub nlu: Vec<NluEntry>,
}

impl TrainingDataset {
    /// Document with no intents
    pub fn empty() -> Self {
        Self {
            version: NLU_FORMAT_VERSION.to_string(),
            nlu: Vec::new(),
        }
    }

    /// Project a raw question bank document
    ///
    /// The document must be an object with an `intents` object. Intents
    /// without an `examples` array are skipped with a warning, examples
    /// without a `text` key are skipped silently, and intents left with
    /// no lines are omitted. Non-string `text` values are rendered as JSON.
    pub fn from_value(document: &Value) -> Result<Self> {
        let intents = document
            .as_object()
            .and_then(|root| root.get("intents"))
            .ok_or_else(|| ConvertError::Structural("missing 'intents' key".to_string()))?
            .as_object()
            .ok_or_else(|| ConvertError::Structural("'intents' is not an object".to_string()))?;

        let mut dataset = Self::empty();
        for (intent, intent_data) in intents {
            let Some(examples) = intent_data.get("examples").and_then(Value::as_array) else {
                warn!(intent = %intent, "Skipped invalid intent format");
                continue;
            };

            let lines: Vec<String> = examples
                .iter()
                .filter_map(|example| example.get("text"))
                .map(|text| format!("- {}", render_text(text)))
                .collect();

            if lines.is_empty() {
                continue;
            }

            debug!(intent = %intent, examples = lines.len(), "Processed intent");
            dataset.nlu.push(NluEntry {
                intent: intent.clone(),
                examples: lines.join("\n"),
            });
        }

        Ok(dataset)
    }

    /// Number of example lines across all intents
    pub fn example_count(&self) -> usize {
        self.nlu
            .iter()
            .map(|entry| entry.examples.lines().count())
            .sum()
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn render_text(text: &Value) -> String {
    match text {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl Default for TrainingDataset {
    fn default() -> Self {
        Self::empty()
    }
}
