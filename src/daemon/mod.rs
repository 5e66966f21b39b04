//! Daemon - scheduled homework checks
//!
//! - JobRunner: one extract-then-deliver cycle plus session statistics
//! - Scheduler: startup check, then hourly ticks until shutdown
//! - tick: tick timing and statistics

pub mod job;
pub mod scheduler;
pub mod tick;

pub use job::JobRunner;
pub use scheduler::Scheduler;
pub use tick::{TickStats, next_tick_delay};
