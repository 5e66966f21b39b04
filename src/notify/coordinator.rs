//! Delivery coordinator.
//!
//! One call to `send_reminders` makes at most one delivery attempt covering
//! both the fresh reminders and whatever failed last time. On failure the whole
//! merged set goes back to the pending queue, so the queue never holds more
//! than one reminder per homework id no matter how many cycles fail.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::EmailConfig;
use crate::domain::Reminder;

use super::format::{build_body, build_subject};
use super::pending::PendingQueue;
use super::transport::MailTransport;

/// What a single `send_reminders` call did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Email notifications are turned off; fresh reminders were dropped
    Disabled,
    /// No recipients configured; fresh reminders were dropped
    NoRecipients,
    /// Nothing pending and nothing fresh
    NothingToSend,
    /// Delivered successfully
    Delivered { recipients: usize, reminders: usize },
    /// Delivery failed and the merged set was queued for the next cycle
    Requeued { reminders: usize },
}

/// Merge by homework id; `fresh` overrides `pending` on collision.
///
/// Order follows first appearance of each id: pending first, then new ids
/// from fresh.
pub fn merge_reminders(pending: Vec<Reminder>, fresh: &[Reminder]) -> Vec<Reminder> {
    let mut merged: Vec<Reminder> = Vec::with_capacity(pending.len() + fresh.len());
    let mut index: HashMap<i64, usize> = HashMap::new();

    for reminder in pending.into_iter().chain(fresh.iter().cloned()) {
        match index.get(&reminder.homework_id) {
            Some(&slot) => merged[slot] = reminder,
            None => {
                index.insert(reminder.homework_id, merged.len());
                merged.push(reminder);
            }
        }
    }
    merged
}

pub struct DeliveryCoordinator {
    queue: Arc<PendingQueue>,
    transport: Arc<dyn MailTransport>,
    email: EmailConfig,
}

impl DeliveryCoordinator {
    pub fn new(queue: Arc<PendingQueue>, transport: Arc<dyn MailTransport>, email: EmailConfig) -> Self {
        Self { queue, transport, email }
    }

    pub fn queue(&self) -> &Arc<PendingQueue> {
        &self.queue
    }

    /// Deliver fresh reminders together with any pending ones.
    ///
    /// Never fails: a delivery error re-queues the merged set and is logged.
    pub async fn send_reminders(&self, fresh: &[Reminder]) -> DeliveryOutcome {
        if !self.email.enabled {
            log::info!("Email notifications disabled, skipping send");
            return DeliveryOutcome::Disabled;
        }

        if self.email.recipients.is_empty() {
            log::info!("No recipients configured (email.recipients), skipping send");
            return DeliveryOutcome::NoRecipients;
        }

        let pending = self.queue.drain();
        let pending_count = pending.len();
        let merged = merge_reminders(pending, fresh);

        if merged.is_empty() {
            log::info!("No reminders to send");
            return DeliveryOutcome::NothingToSend;
        }

        if pending_count > 0 {
            log::info!(
                "Merged {} pending reminder(s), sending {} in total",
                pending_count,
                merged.len()
            );
        }

        let subject = build_subject(&self.email.subject_prefix, &merged);
        let body = build_body(&merged);

        match self.transport.deliver(&self.email.recipients, &subject, &body).await {
            Ok(()) => {
                log::info!(
                    "Sent homework reminder email, recipients: {}, reminders: {}",
                    self.email.recipients.len(),
                    merged.len()
                );
                DeliveryOutcome::Delivered {
                    recipients: self.email.recipients.len(),
                    reminders: merged.len(),
                }
            }
            Err(e) => {
                self.queue.add(&merged);
                tracing::warn!(
                    reminders = merged.len(),
                    pending = self.queue.size(),
                    "Email delivery failed, reminders queued for the next cycle"
                );
                log::error!("Failed to send homework reminder email: {}", e);
                DeliveryOutcome::Requeued {
                    reminders: merged.len(),
                }
            }
        }
    }
}
