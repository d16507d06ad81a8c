//! Convert command handler

use crate::error::CliError;
use botforge::BotforgeApp;

pub async fn run_convert(
    app: &BotforgeApp,
    source: Option<String>,
    destination: Option<String>,
) -> Result<(), CliError> {
    let config = app.config();
    let source = source.unwrap_or_else(|| config.questions_file.clone());
    let destination = destination.unwrap_or_else(|| config.nlu_file.clone());

    println!("🔄 Converting {} -> {}", source, destination);
    let summary = app.converter().try_convert(&source, &destination).await?;

    println!(
        "✅ Wrote {} intents, {} examples",
        summary.intents, summary.examples
    );
    println!("   sha256: {}", summary.digest);
    Ok(())
}
