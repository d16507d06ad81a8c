//! External training backend

use super::TrainerError;
use crate::config::BotforgeConfig;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Environment variable carrying the training data path to the command
pub const TRAINING_DATA_ENV: &str = "BOTFORGE_TRAINING_DATA";

/// Something that turns a training data file into a model artifact
#[async_trait]
pub trait ExternalTrainer: Send + Sync {
    /// Train a model from the dataset; returns once training has finished
    async fn train(&self, dataset_path: &Path) -> Result<(), TrainerError>;

    /// Human-readable description for logs
    fn describe(&self) -> String {
        "external trainer".to_string()
    }
}

/// Runs the NLU framework's training CLI as a child process
#[derive(Debug, Clone)]
pub struct CommandTrainer {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Duration,
}

impl CommandTrainer {
    /// Create a trainer for `program args...`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            timeout: Duration::from_secs(60 * 60),
        }
    }

    /// Trainer configured from `config.training`, run inside `base_dir`
    pub fn from_config(config: &BotforgeConfig) -> Self {
        Self::new(config.training.program.clone(), config.training.args.clone())
            .with_working_dir(&config.base_dir)
            .with_timeout(config.training.timeout())
    }

    /// Set the directory the command runs in
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set the maximum run time before the process is killed
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ExternalTrainer for CommandTrainer {
    async fn train(&self, dataset_path: &Path) -> Result<(), TrainerError> {
        // Absolute, since the child runs in its own working directory
        let dataset_path =
            std::path::absolute(dataset_path).unwrap_or_else(|_| dataset_path.to_path_buf());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env(TRAINING_DATA_ENV, &dataset_path)
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(command = %self.describe(), "Spawning training command");
        let mut child = cmd.spawn().map_err(|e| TrainerError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;

        match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => Err(TrainerError::ExitStatus(status)),
            Ok(Err(e)) => Err(TrainerError::Wait(e)),
            Err(_) => {
                warn!(timeout = ?self.timeout, "Training command timed out, killing it");
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill training command: {}", e);
                }
                Err(TrainerError::Timeout(self.timeout))
            }
        }
    }

    fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command() {
        let trainer = CommandTrainer::new("true", vec![]);
        trainer.train(Path::new("data/nlu.yml")).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        let trainer = CommandTrainer::new("false", vec![]);
        let err = trainer.train(Path::new("data/nlu.yml")).await.unwrap_err();
        assert!(matches!(err, TrainerError::ExitStatus(_)));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let trainer = CommandTrainer::new("botforge-no-such-program", vec![]);
        let err = trainer.train(Path::new("data/nlu.yml")).await.unwrap_err();
        assert!(matches!(err, TrainerError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let trainer = CommandTrainer::new("sleep", vec!["5".to_string()])
            .with_timeout(Duration::from_millis(100));
        let err = trainer.train(Path::new("data/nlu.yml")).await.unwrap_err();
        assert!(matches!(err, TrainerError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_dataset_path_is_exported() {
        let expected = std::path::absolute("data/nlu.yml").unwrap();
        let trainer = CommandTrainer::new(
            "sh",
            vec![
                "-c".to_string(),
                format!(
                    "test \"${}\" = '{}'",
                    TRAINING_DATA_ENV,
                    expected.display()
                ),
            ],
        );
        trainer.train(Path::new("data/nlu.yml")).await.unwrap();
    }

    #[tokio::test]
    async fn test_dataset_reachable_from_relative_working_dir() {
        // Relative to the test's cwd, like `--base-dir bot`
        let base = tempfile::Builder::new().tempdir_in(".").unwrap();
        assert!(base.path().is_relative());
        std::fs::create_dir_all(base.path().join("data")).unwrap();
        std::fs::write(base.path().join("data/nlu.yml"), "version: '3.1'\n").unwrap();

        let config = BotforgeConfig {
            base_dir: base.path().to_string_lossy().to_string(),
            training: crate::config::TrainingCommandConfig {
                program: "sh".to_string(),
                args: vec![
                    "-c".to_string(),
                    format!("test -f \"${}\"", TRAINING_DATA_ENV),
                ],
                timeout_secs: 10,
            },
            ..Default::default()
        };

        let trainer = CommandTrainer::from_config(&config);
        trainer
            .train(&config.resolve(&config.nlu_file))
            .await
            .unwrap();
    }

    #[test]
    fn test_describe() {
        let config = BotforgeConfig::default();
        assert_eq!(
            CommandTrainer::from_config(&config).describe(),
            "rasa train --quiet"
        );
    }
}
