//! Reminder extraction
//!
//! Turns fetched course data into the list of homework reminders due now.

pub mod checker;
pub mod extractor;

pub use checker::DeadlineChecker;
pub use extractor::{extract_reminders, hours_until, should_remind};
