//! Pending reminder queue.
//!
//! Holds reminders whose delivery failed until the next cycle drains them.
//! At most one reminder per homework id is held; the first one added wins.
//! State is in-memory only and is lost on restart.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::Reminder;

#[derive(Debug, Default)]
pub struct PendingQueue {
    reminders: Mutex<Vec<Reminder>>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // No operation leaves the Vec half-updated, so poisoning is ignored
    fn lock(&self) -> MutexGuard<'_, Vec<Reminder>> {
        self.reminders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add reminders whose homework id is not already queued.
    pub fn add(&self, reminders: &[Reminder]) {
        if reminders.is_empty() {
            return;
        }

        let mut queued = self.lock();
        for reminder in reminders {
            if !queued.iter().any(|r| r.homework_id == reminder.homework_id) {
                queued.push(reminder.clone());
            }
        }
        log::info!(
            "Added {} reminder(s) to the pending queue, queue size: {}",
            reminders.len(),
            queued.len()
        );
    }

    /// Remove and return everything queued.
    pub fn drain(&self) -> Vec<Reminder> {
        let drained = std::mem::take(&mut *self.lock());
        if !drained.is_empty() {
            log::info!("Drained {} reminder(s) from the pending queue", drained.len());
        }
        drained
    }

    /// Snapshot count for observability only.
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    /// Discard everything queued.
    pub fn clear(&self) {
        let mut queued = self.lock();
        let count = queued.len();
        queued.clear();
        if count > 0 {
            log::info!("Cleared the pending queue, discarded {} reminder(s)", count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn reminder(id: i64, remaining_hours: i64) -> Reminder {
        Reminder {
            homework_id: id,
            homework_name: format!("hw-{}", id),
            chapter_name: "ch".to_string(),
            course_name: "course".to_string(),
            deadline: Local.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            remaining_hours,
            total_score: None,
            user_score: None,
            is_completed: false,
        }
    }

    #[test]
    fn test_new_queue_is_empty() {
        let queue = PendingQueue::new();
        assert_eq!(queue.size(), 0);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_add_dedups_within_one_call() {
        let queue = PendingQueue::new();
        queue.add(&[reminder(1, 24), reminder(1, 2), reminder(2, 5)]);
        assert_eq!(queue.size(), 2);

        // First writer wins
        let drained = queue.drain();
        let first = drained.iter().find(|r| r.homework_id == 1).unwrap();
        assert_eq!(first.remaining_hours, 24);
    }

    #[test]
    fn test_add_dedups_across_calls() {
        let queue = PendingQueue::new();
        queue.add(&[reminder(7, 24)]);
        queue.add(&[reminder(7, 1)]);
        assert_eq!(queue.size(), 1);
        assert_eq!(queue.drain()[0].remaining_hours, 24);
    }

    #[test]
    fn test_add_empty_is_noop() {
        let queue = PendingQueue::new();
        queue.add(&[]);
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn test_drain_returns_everything_once() {
        let queue = PendingQueue::new();
        queue.add(&[reminder(1, 1), reminder(2, 2), reminder(3, 3)]);

        let ids: HashSet<i64> = queue.drain().iter().map(|r| r.homework_id).collect();
        assert_eq!(ids, HashSet::from([1, 2, 3]));
        assert!(queue.drain().is_empty());
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn test_drain_then_add_same_id_is_accepted() {
        let queue = PendingQueue::new();
        queue.add(&[reminder(1, 24)]);
        queue.drain();
        queue.add(&[reminder(1, 2)]);
        assert_eq!(queue.drain()[0].remaining_hours, 2);
    }

    #[test]
    fn test_clear() {
        let queue = PendingQueue::new();
        queue.add(&[reminder(1, 1), reminder(2, 2)]);
        queue.clear();
        assert_eq!(queue.size(), 0);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_concurrent_add_and_drain_loses_nothing() {
        let queue = Arc::new(PendingQueue::new());
        let producers: Vec<_> = (0..4)
            .map(|t| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        queue.add(&[reminder(t * 1000 + i, 1)]);
                    }
                })
            })
            .collect();

        let mut seen = Vec::new();
        for _ in 0..50 {
            seen.extend(queue.drain());
        }
        for producer in producers {
            producer.join().unwrap();
        }
        seen.extend(queue.drain());

        // Every id lands in exactly one drain
        let unique: HashSet<i64> = seen.iter().map(|r| r.homework_id).collect();
        assert_eq!(seen.len(), 1000);
        assert_eq!(unique.len(), 1000);
    }
}
