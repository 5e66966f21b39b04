//! Homework reminder value type.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Hours remaining at or below which a reminder is urgent.
pub const URGENT_HOURS: i64 = 1;

/// One homework assignment that needs a reminder.
///
/// `remaining_hours` is a snapshot taken when the reminder was extracted and is
/// never recomputed; a reminder carried over from a failed delivery keeps the
/// value from its original cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Identity used for deduplication.
    pub homework_id: i64,
    pub homework_name: String,
    pub chapter_name: String,
    pub course_name: String,
    pub deadline: DateTime<Local>,
    pub remaining_hours: i64,
    pub total_score: Option<f64>,
    pub user_score: Option<f64>,
    pub is_completed: bool,
}

impl Reminder {
    pub fn is_urgent(&self) -> bool {
        self.remaining_hours <= URGENT_HOURS
    }

    /// Human readable remaining time, e.g. "1d 2h", "5h" or "closed".
    pub fn formatted_remaining_time(&self) -> String {
        match self.remaining_hours {
            h if h >= 24 => format!("{}d {}h", h / 24, h % 24),
            h if h > 0 => format!("{}h", h),
            _ => "closed".to_string(),
        }
    }

    pub fn completion_status(&self) -> String {
        if self.is_completed {
            format!(
                "completed (score: {}/{})",
                format_score(self.user_score),
                format_score(self.total_score)
            )
        } else {
            "not completed".to_string()
        }
    }
}

fn format_score(score: Option<f64>) -> String {
    score.map(|s| s.to_string()).unwrap_or_else(|| "unknown".to_string())
}
