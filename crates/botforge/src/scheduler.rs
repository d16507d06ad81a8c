//! Periodic retraining
//!
//! The scheduler runs its job once on start, then once per tick until the
//! shutdown future resolves. Runs are strictly sequential: a run that
//! overruns the interval delays the next tick instead of overlapping it, and
//! shutdown is only observed between runs.

use crate::training::TrainingJob;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::Display;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{info, warn};

/// Unit of work driven by the scheduler
#[async_trait]
pub trait Job: Send + Sync {
    /// Run once, reporting success
    async fn run_once(&self) -> bool;
}

#[async_trait]
impl Job for TrainingJob {
    async fn run_once(&self) -> bool {
        self.train_model().await
    }
}

/// Source of scheduling ticks
#[async_trait]
pub trait Ticker: Send {
    /// Wait for the next tick
    async fn tick(&mut self);

    /// Restart the period from now; called after every run
    fn reset(&mut self) {}
}

/// Wall-clock ticker with a fixed period
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }

    fn reset(&mut self) {
        self.interval.reset();
    }
}

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SchedulerState {
    /// Waiting for the next tick
    Idle,
    /// A job run is in progress
    Running,
}

/// Counters returned when the scheduler stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub runs: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Sequential repeating runner
pub struct Scheduler<J, T> {
    job: Arc<J>,
    ticker: T,
    state: watch::Sender<SchedulerState>,
}

impl<J: Job + 'static> Scheduler<J, IntervalTicker> {
    /// Scheduler firing every `period`
    pub fn every(job: Arc<J>, period: Duration) -> Self {
        Self::new(job, IntervalTicker::new(period))
    }
}

impl<J, T> Scheduler<J, T>
where
    J: Job + 'static,
    T: Ticker + 'static,
{
    pub fn new(job: Arc<J>, ticker: T) -> Self {
        let (state, _) = watch::channel(SchedulerState::Idle);
        Self { job, ticker, state }
    }

    /// Observe state transitions
    pub fn state(&self) -> watch::Receiver<SchedulerState> {
        self.state.subscribe()
    }

    /// Run until `shutdown` resolves
    pub async fn run<F>(mut self, shutdown: F) -> SchedulerStats
    where
        F: Future<Output = ()> + Send,
    {
        tokio::pin!(shutdown);
        let mut stats = SchedulerStats::default();

        info!("Scheduler started");
        loop {
            Self::run_job(&self.job, &self.state, &mut stats).await;
            self.ticker.reset();

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!(runs = stats.runs, "Scheduler stopped");
                    break;
                }
                _ = self.ticker.tick() => {}
            }
        }

        stats
    }

    /// Run on a background task
    pub fn spawn<F>(self, shutdown: F) -> JoinHandle<SchedulerStats>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(self.run(shutdown))
    }

    // Takes fields rather than `&self` so the future does not require `T: Sync`
    async fn run_job(
        job: &Arc<J>,
        state: &watch::Sender<SchedulerState>,
        stats: &mut SchedulerStats,
    ) {
        state.send_replace(SchedulerState::Running);
        let ok = job.run_once().await;
        state.send_replace(SchedulerState::Idle);

        stats.runs += 1;
        if ok {
            stats.succeeded += 1;
        } else {
            stats.failed += 1;
            warn!(run = stats.runs, "Scheduled run failed");
        }
    }
}
