//! Domain types for moocnotify
//!
//! - Reminder: one homework assignment nearing its deadline, keyed by homework id
//! - Course models: the MOOC term response (chapters, homework, tests)

pub mod course;
pub mod reminder;

pub use course::{Chapter, Homework, HomeworkTest, MocTermDto, MocTermResult, MoocResponse};
pub use reminder::Reminder;
