//! One homework check cycle: extract, then deliver.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local};

use crate::extract::DeadlineChecker;
use crate::notify::{DeliveryCoordinator, DeliveryOutcome, PendingQueue};

use super::tick::TickStats;

/// Runs check cycles and keeps session statistics
pub struct JobRunner {
    checker: DeadlineChecker,
    coordinator: DeliveryCoordinator,
    stats: Mutex<TickStats>,
}

impl JobRunner {
    pub fn new(checker: DeadlineChecker, coordinator: DeliveryCoordinator) -> Self {
        Self {
            checker,
            coordinator,
            stats: Mutex::new(TickStats::new()),
        }
    }

    /// Run one cycle.
    ///
    /// The coordinator is called even when nothing is fresh so that pending
    /// reminders are retried every tick.
    pub async fn run_once(&self, now: DateTime<Local>) -> DeliveryOutcome {
        log::info!("=== Homework check started ===");

        let fresh = self.checker.check(now).await;
        if fresh.is_empty() {
            log::info!("No homework needs a reminder right now");
        }

        let outcome = self.coordinator.send_reminders(&fresh).await;
        let pending = self.queue().size();
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(&outcome, pending);

        log::info!("=== Homework check finished: {:?}, pending: {} ===", outcome, pending);
        outcome
    }

    pub fn queue(&self) -> &Arc<PendingQueue> {
        self.coordinator.queue()
    }

    pub fn stats(&self) -> TickStats {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
