//! moocnotify - homework deadline reminders for MOOC courses
//!
//! Polls the MOOC platform for the configured course terms, picks out homework
//! nearing its deadline, and emails one consolidated reminder per cycle.
//! Reminders whose delivery fails are retried on the next cycle.

pub mod config;
pub mod daemon;
pub mod domain;
pub mod error;
pub mod extract;
pub mod mooc;
pub mod notify;

pub use error::{NotifyError, Result};
