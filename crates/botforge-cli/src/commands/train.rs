//! Train command handler

use crate::error::CliError;
use botforge::BotforgeApp;

/// Run one training cycle in the foreground
pub async fn run_train(app: &BotforgeApp) -> Result<(), CliError> {
    println!("🎯 Starting training...\n");

    let report = app.training_job().run().await?;

    println!(
        "✅ Training completed in {:.2}s ({} intents, {} examples)",
        report.duration.as_secs_f64(),
        report.conversion.intents,
        report.conversion.examples
    );
    if let Some(model) = &report.latest_model {
        println!("📦 Latest model: {}", model.path);
    }
    for removed in &report.removed_models {
        println!("🗑️  Removed old model: {}", removed.path);
    }
    if report.cache_cleared {
        println!("🧹 Cleared training cache");
    }

    Ok(())
}
