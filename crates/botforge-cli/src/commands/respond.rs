//! Respond command handler

use crate::error::CliError;
use botforge::BotforgeApp;
use botforge_core::Request;

/// Resolve a reply for a message the way the dialogue host would
pub async fn run_respond(
    app: &BotforgeApp,
    message: &str,
    intent: Option<String>,
    confidence: f64,
    json: bool,
) -> Result<(), CliError> {
    let request = match intent {
        Some(intent) => Request::with_intent(message, intent, confidence),
        None => Request::simple(message),
    };

    let response = app.respond(request).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&response)
            .map_err(|e| CliError::InvalidInput(format!("Failed to render response: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("🤖 {}", response.message);
    for event in response.events() {
        println!("   slot {} = {}", event.name, event.value);
    }
    Ok(())
}
