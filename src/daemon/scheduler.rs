//! Scheduler - runs the homework check on a fixed cadence
//!
//! The first check runs after a short startup delay, then at every top of the
//! hour (or every `interval_secs` when not aligned). A cycle that panics is
//! logged and the next tick still runs.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use crate::config::ScheduleConfig;

use super::job::JobRunner;
use super::tick::next_tick_delay;

pub struct Scheduler {
    runner: Arc<JobRunner>,
    config: ScheduleConfig,
}

impl Scheduler {
    pub fn new(runner: Arc<JobRunner>, config: ScheduleConfig) -> Self {
        Self { runner, config }
    }

    /// Run ticks until `shutdown` resolves
    pub async fn run<F: Future<Output = ()>>(&self, shutdown: F) {
        tokio::pin!(shutdown);

        let interval = Duration::from_secs(self.config.interval_secs);
        let mut delay = Duration::from_secs(self.config.initial_delay_secs);
        log::info!("Scheduler started, first check in {}s", delay.as_secs());

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(delay) => {}
            }

            self.tick().await;

            delay = next_tick_delay(Local::now(), interval, self.config.align_to_hour);
            log::info!("Next check in {}s", delay.as_secs());
        }

        let stats = self.runner.stats();
        log::info!(
            "Scheduler stopped after {} check(s): {} delivered, {} re-queued",
            stats.tick_count,
            stats.delivered,
            stats.requeued
        );
        let pending = self.runner.queue().size();
        if pending > 0 {
            log::warn!("Discarding {} pending reminder(s) on shutdown", pending);
        }
    }

    /// Run one cycle on its own task so a panic cannot take down the loop
    async fn tick(&self) {
        let runner = self.runner.clone();
        let handle = tokio::spawn(async move { runner.run_once(Local::now()).await });
        if let Err(e) = handle.await {
            log::error!("Homework check failed: {}", e);
        }
    }
}
