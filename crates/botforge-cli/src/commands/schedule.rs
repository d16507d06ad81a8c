//! Schedule command handler

use crate::error::CliError;
use botforge::BotforgeApp;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Retrain now and then on every interval until Ctrl-C
pub async fn run_schedule(app: &BotforgeApp, interval_minutes: Option<u64>) -> Result<(), CliError> {
    let period = interval_minutes
        .map(|minutes| Duration::from_secs(minutes.max(1) * 60))
        .unwrap_or_else(|| app.config().interval());

    // Registered before the first run starts so an early Ctrl-C still waits for it
    let shutdown = shutdown_signal()?;

    println!(
        "⏰ Retraining every {} minutes. Press Ctrl-C to stop.",
        period.as_secs() / 60
    );

    let scheduler = botforge::Scheduler::every(Arc::new(app.training_job()), period);
    let stats = scheduler
        .spawn(shutdown)
        .await
        .map_err(|e| CliError::InvalidInput(format!("Scheduler task failed: {}", e)))?;

    println!(
        "\n👋 Scheduler stopped after {} runs ({} succeeded, {} failed)",
        stats.runs, stats.succeeded, stats.failed
    );
    Ok(())
}

/// Install the interrupt handler immediately and resolve on the first Ctrl-C
pub fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static, CliError> {
    #[cfg(unix)]
    let mut interrupt =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
    #[cfg(windows)]
    let mut interrupt = tokio::signal::windows::ctrl_c()?;

    Ok(async move {
        interrupt.recv().await;
        info!("Shutdown requested");
    })
}
