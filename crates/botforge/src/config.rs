use crate::responder::ResponderMessages;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Botforge configuration
///
/// Every path except `base_dir` is relative to `base_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotforgeConfig {
    /// Base directory for all storage
    pub base_dir: String,

    /// Question bank (JSON)
    pub questions_file: String,

    /// Generated NLU training data (YAML)
    pub nlu_file: String,

    /// Canned responses keyed by intent then language (JSON)
    pub responses_file: String,

    /// Trained model artifacts directory
    pub models_dir: String,

    /// Training framework cache directory, removed after each run
    pub cache_dir: String,

    /// File suffix identifying model artifacts
    pub model_extension: String,

    /// Number of newest artifacts kept after a successful run
    pub keep_models: usize,

    /// Minutes between scheduled training runs
    pub interval_minutes: u64,

    /// Replies below this confidence use the fallback message
    pub confidence_threshold: f64,

    /// Directory for log files
    pub log_dir: String,

    /// Log file name inside `log_dir`
    pub log_file: String,

    /// Log level
    pub log_level: String,

    /// Fixed responder replies
    pub messages: ResponderMessages,

    /// External training command
    pub training: TrainingCommandConfig,
}

impl Default for BotforgeConfig {
    fn default() -> Self {
        Self {
            base_dir: ".".to_string(),
            questions_file: "data/questions.json".to_string(),
            nlu_file: "data/nlu.yml".to_string(),
            responses_file: "data/responses.json".to_string(),
            models_dir: "models".to_string(),
            cache_dir: ".rasa".to_string(),
            model_extension: ".tar.gz".to_string(),
            keep_models: 2,
            interval_minutes: 15,
            confidence_threshold: 0.6,
            log_dir: "logs".to_string(),
            log_file: "botforge.log".to_string(),
            log_level: "info".to_string(),
            messages: ResponderMessages::default(),
            training: TrainingCommandConfig::default(),
        }
    }
}

impl BotforgeConfig {
    /// Load from configuration file
    ///
    /// `.toml` files are parsed as TOML, anything else as JSON.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
        }
    }

    /// Interval between scheduled training runs
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.max(1) * 60)
    }

    /// Absolute location of a path stored relative to `base_dir`
    pub fn resolve(&self, relative: &str) -> PathBuf {
        Path::new(&self.base_dir).join(relative)
    }
}

/// External training command configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingCommandConfig {
    /// Program to execute
    pub program: String,

    /// Arguments passed to the program
    pub args: Vec<String>,

    /// Kill the training process after this many seconds
    pub timeout_secs: u64,
}

impl Default for TrainingCommandConfig {
    fn default() -> Self {
        Self {
            program: "rasa".to_string(),
            args: vec!["train".to_string(), "--quiet".to_string()],
            timeout_secs: 60 * 60,
        }
    }
}

impl TrainingCommandConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
