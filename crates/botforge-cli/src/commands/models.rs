//! Models command handler

use crate::error::CliError;
use botforge::BotforgeApp;

/// List model artifacts, newest first
pub async fn run_models(app: &BotforgeApp) -> Result<(), CliError> {
    let artifacts = app.artifacts().list().await?;

    if artifacts.is_empty() {
        println!("📦 No models in {}", app.config().models_dir);
        return Ok(());
    }

    println!("📦 Models (newest first):\n");
    for (i, artifact) in artifacts.iter().enumerate() {
        let marker = if i == 0 { "⭐" } else { "  " };
        println!(
            "{} {}  {}  {:.1} MB",
            marker,
            artifact.path,
            artifact.modified.format("%Y-%m-%d %H:%M:%S"),
            artifact.size as f64 / (1024.0 * 1024.0)
        );
    }
    Ok(())
}
