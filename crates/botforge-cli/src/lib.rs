//! botforge CLI library

pub mod commands;
pub mod error;
pub mod logging;

use botforge::{BotforgeConfig, BotforgeError};
use error::CliError;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "botforge.toml";

/// Global options shared by every subcommand
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    /// Configuration file (TOML or JSON)
    #[arg(long, short = 'c', global = true, env = "BOTFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base directory for data, models and logs
    #[arg(long, global = true, env = "BOTFORGE_BASE_DIR")]
    pub base_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BOTFORGE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl GlobalArgs {
    /// Load the configuration file and apply command-line overrides
    ///
    /// Without `--config`, `botforge.toml` is looked up in `--base-dir`
    /// first, then in the working directory.
    pub fn load_config(&self) -> Result<BotforgeConfig, CliError> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            None => self.default_config_path(),
        };
        let mut config = match path {
            Some(path) => load(&path)?,
            None => BotforgeConfig::default(),
        };

        if let Some(base_dir) = &self.base_dir {
            config.base_dir = base_dir.clone();
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }
        Ok(config)
    }

    fn default_config_path(&self) -> Option<PathBuf> {
        let in_base_dir = self
            .base_dir
            .as_ref()
            .map(|base_dir| Path::new(base_dir).join(DEFAULT_CONFIG_FILE));

        in_base_dir
            .into_iter()
            .chain(std::iter::once(PathBuf::from(DEFAULT_CONFIG_FILE)))
            .find(|path| path.exists())
    }
}

fn load(path: &Path) -> Result<BotforgeConfig, CliError> {
    BotforgeConfig::load_from_file(path).map_err(|e| {
        BotforgeError::Config(format!("{}: {:#}", path.display(), e)).into()
    })
}
