//! Per-cycle deadline check across all configured course terms.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::domain::Reminder;
use crate::mooc::{CourseFetcher, fetch_all};

use super::extractor::extract_reminders;

/// Fetches each configured term and extracts the reminders due now.
///
/// A term that fails to fetch contributes nothing; it is not retried.
pub struct DeadlineChecker {
    fetcher: Arc<dyn CourseFetcher>,
    term_ids: Vec<String>,
    reminder_hours: Vec<i64>,
}

impl DeadlineChecker {
    pub fn new(fetcher: Arc<dyn CourseFetcher>, term_ids: Vec<String>, reminder_hours: Vec<i64>) -> Self {
        Self {
            fetcher,
            term_ids,
            reminder_hours,
        }
    }

    pub async fn check(&self, now: DateTime<Local>) -> Vec<Reminder> {
        if self.term_ids.is_empty() {
            log::warn!("No course term ids configured (mooc.term_ids), skipping homework check");
            return Vec::new();
        }

        log::info!("Checking homework deadlines for {} course term(s)", self.term_ids.len());

        let reminders: Vec<Reminder> = fetch_all(self.fetcher.as_ref(), &self.term_ids)
            .await
            .iter()
            .flat_map(|(_, response)| extract_reminders(response, &self.reminder_hours, now))
            .collect();

        log::info!("Homework check complete, {} reminder(s) due", reminders.len());
        reminders
    }
}
