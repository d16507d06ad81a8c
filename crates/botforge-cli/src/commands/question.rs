//! Question bank commands

use crate::error::CliError;
use botforge::BotforgeApp;

pub async fn run_add(
    app: &BotforgeApp,
    intent: &str,
    text: &str,
    confidence: Option<f64>,
) -> Result<(), CliError> {
    if intent.trim().is_empty() {
        return Err(CliError::InvalidInput("Intent must not be empty".to_string()));
    }
    if let Some(confidence) = confidence.filter(|c| !(0.0..=1.0).contains(c)) {
        return Err(CliError::InvalidInput(format!(
            "Confidence must be between 0 and 1, got {}",
            confidence
        )));
    }

    let store = app.question_store();
    store.ensure_initialized().await?;

    if store.add_question(intent, text, confidence).await? {
        println!("✅ Added to '{}': {}", intent, text.trim());
    } else {
        println!("⚠️  Skipped: blank or already present under '{}'", intent);
    }

    Ok(())
}

pub async fn run_list(app: &BotforgeApp, json: bool) -> Result<(), CliError> {
    let store = app.question_store();
    if !store.exists().await? {
        println!("❌ No question bank yet. Run: botforge init");
        return Ok(());
    }

    let questions = store.get_all_questions().await?;
    if json {
        let rendered = serde_json::to_string_pretty(&questions)
            .map_err(|e| CliError::InvalidInput(format!("Failed to render questions: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    if questions.is_empty() {
        println!("📋 Question bank is empty");
        return Ok(());
    }

    println!("📋 Questions by intent:\n");
    for (intent, texts) in &questions {
        println!("{} ({})", intent, texts.len());
        for text in texts {
            println!("  - {}", text);
        }
    }

    let total: usize = questions.values().map(Vec::len).sum();
    println!("\n{} intents, {} examples", questions.len(), total);
    Ok(())
}
