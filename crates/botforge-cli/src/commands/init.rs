//! Init command handler

use crate::DEFAULT_CONFIG_FILE;
use crate::error::CliError;
use botforge::{BotforgeApp, BotforgeError};
use std::fs;
use std::path::Path;

const SAMPLE_RESPONSES: &str = r#"{
  "greet": {
    "TH": "สวัสดีค่ะ มีอะไรให้ช่วยไหมคะ",
    "JA": "こんにちは！何かお手伝いできることはありますか？",
    "EN": "Hello! How can I help you?"
  }
}
"#;

pub async fn run_init(app: &BotforgeApp) -> Result<(), CliError> {
    println!("🚀 Initializing botforge workspace...");

    let config = app.config();
    let storage = app.storage();

    for dir in [&config.models_dir, &config.log_dir] {
        if storage.exists(dir).await? {
            println!("✅ {} directory already exists", dir);
        } else {
            println!("📁 Creating {} directory...", dir);
            storage.create_dir(dir).await?;
        }
    }

    app.question_store().ensure_initialized().await?;
    println!("📝 Question bank: {}", config.questions_file);
    println!("📝 Training data: {}", config.nlu_file);

    if !storage.exists(&config.responses_file).await? {
        println!("📝 Creating sample responses file...");
        storage
            .write(&config.responses_file, SAMPLE_RESPONSES.as_bytes())
            .await?;
    }

    let config_path = config.resolve(DEFAULT_CONFIG_FILE);
    if !config_path.exists() {
        println!("📝 Creating {}...", DEFAULT_CONFIG_FILE);
        let mut defaults = config.clone();
        defaults.base_dir = ".".to_string();
        let content = toml::to_string_pretty(&defaults).map_err(|e| {
            BotforgeError::Config(format!("Failed to render config: {}", e))
        })?;
        fs::write(&config_path, content)?;
    }

    let env_path = Path::new(&config.base_dir).join(".env");
    if !env_path.exists() {
        println!("📝 Creating .env file...");
        let env_content = r#"# botforge configuration
# BOTFORGE_LOG_LEVEL=info
# BOTFORGE_BASE_DIR=.
"#;
        fs::write(env_path, env_content)?;
    }

    println!("\n✨ botforge workspace initialized successfully!");
    println!("\nNext steps:");
    println!("  1. Run 'botforge add <intent> <text>' to collect questions");
    println!("  2. Run 'botforge train' to train a model");
    println!("  3. Run 'botforge schedule' to retrain periodically");

    Ok(())
}
