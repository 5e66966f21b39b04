//! Tick timing and per-session statistics.

use std::time::Duration;

use chrono::{DateTime, Local, Timelike};

use crate::notify::DeliveryOutcome;

/// Delay until the next tick.
///
/// Aligned ticks land on the next top of the hour; otherwise the delay is the
/// plain interval.
pub fn next_tick_delay(now: DateTime<Local>, interval: Duration, align_to_hour: bool) -> Duration {
    if !align_to_hour {
        return interval;
    }
    let into_hour = u64::from(now.minute()) * 60 + u64::from(now.second());
    let remaining = Duration::from_secs(3600 - into_hour);
    remaining.saturating_sub(Duration::from_nanos(u64::from(now.nanosecond() % 1_000_000_000)))
}

/// Counters for what ticks have done since start
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickStats {
    /// Number of check cycles run
    pub tick_count: u64,
    /// Cycles that delivered an email
    pub delivered: u64,
    /// Cycles whose delivery failed and re-queued
    pub requeued: u64,
    /// Cycles skipped because email is disabled or has no recipients
    pub skipped: u64,
    /// Cycles with nothing to send
    pub idle: u64,
    /// Pending queue size after the last cycle
    pub pending: usize,
}

impl TickStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one cycle
    pub fn record(&mut self, outcome: &DeliveryOutcome, pending: usize) {
        self.tick_count += 1;
        self.pending = pending;
        match outcome {
            DeliveryOutcome::Delivered { .. } => self.delivered += 1,
            DeliveryOutcome::Requeued { .. } => self.requeued += 1,
            DeliveryOutcome::Disabled | DeliveryOutcome::NoRecipients => self.skipped += 1,
            DeliveryOutcome::NothingToSend => self.idle += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_tick_delay_unaligned() {
        let now = Local.with_ymd_and_hms(2026, 5, 10, 12, 17, 3).unwrap();
        assert_eq!(
            next_tick_delay(now, Duration::from_secs(900), false),
            Duration::from_secs(900)
        );
    }

    #[test]
    fn test_next_tick_delay_aligned() {
        let now = Local.with_ymd_and_hms(2026, 5, 10, 12, 15, 0).unwrap();
        assert_eq!(
            next_tick_delay(now, Duration::from_secs(3600), true),
            Duration::from_secs(45 * 60)
        );
    }

    #[test]
    fn test_next_tick_delay_on_the_hour_waits_full_hour() {
        let now = Local.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(
            next_tick_delay(now, Duration::from_secs(3600), true),
            Duration::from_secs(3600)
        );
    }

    #[test]
    fn test_tick_stats_record() {
        let mut stats = TickStats::new();
        stats.record(
            &DeliveryOutcome::Delivered {
                recipients: 1,
                reminders: 3,
            },
            0,
        );
        stats.record(&DeliveryOutcome::Requeued { reminders: 2 }, 2);
        stats.record(&DeliveryOutcome::NoRecipients, 2);
        stats.record(&DeliveryOutcome::NothingToSend, 2);

        assert_eq!(stats.tick_count, 4);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.requeued, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.idle, 1);
        assert_eq!(stats.pending, 2);
    }
}
