//! Pure reminder extraction over one course term.
//!
//! A homework is due for a reminder when its whole hours until deadline fall
//! within one hour of any configured threshold and the deadline has not passed.

use chrono::{DateTime, Local, TimeZone};

use crate::domain::{MoocResponse, Reminder};

const UNKNOWN_COURSE: &str = "Unknown course";
const UNKNOWN_CHAPTER: &str = "Unknown chapter";
const UNTITLED_HOMEWORK: &str = "Untitled homework";

/// Whole hours from `now` until `deadline`, truncated toward zero.
pub fn hours_until(now: DateTime<Local>, deadline: DateTime<Local>) -> i64 {
    (deadline - now).num_hours()
}

/// True when `hours` is non-negative and within ±1 of a threshold.
pub fn should_remind(hours: i64, reminder_hours: &[i64]) -> bool {
    hours >= 0 && reminder_hours.iter().any(|h| (h - 1..=h + 1).contains(&hours))
}

/// Collect reminders for every homework in the term that is due now.
pub fn extract_reminders(response: &MoocResponse, reminder_hours: &[i64], now: DateTime<Local>) -> Vec<Reminder> {
    let Some(term) = response.term() else {
        log::warn!("Response has no mocTermDto, cannot read homework");
        return Vec::new();
    };

    let course_name = term.course_name.as_deref().unwrap_or(UNKNOWN_COURSE);
    log::info!("Course: {}, chapters: {}", course_name, term.chapters.len());

    let mut reminders = Vec::new();
    for chapter in &term.chapters {
        let chapter_name = chapter.name.as_deref().unwrap_or(UNKNOWN_CHAPTER);
        log::debug!("Checking chapter: {}, homework count: {}", chapter_name, chapter.homeworks.len());

        for homework in &chapter.homeworks {
            let homework_name = homework.name.as_deref().unwrap_or(UNTITLED_HOMEWORK);
            let Some(test) = &homework.test else {
                log::debug!("Homework {} has no test info, skipping", homework_name);
                continue;
            };

            let Some(deadline) = Local.timestamp_millis_opt(test.deadline).single() else {
                log::warn!("Homework {} has an invalid deadline {}, skipping", homework_name, test.deadline);
                continue;
            };

            let remaining_hours = hours_until(now, deadline);
            if !should_remind(remaining_hours, reminder_hours) {
                continue;
            }

            let is_completed = test.user_score.is_some_and(|s| s > 0.0);
            log::info!(
                "Reminder due: {} - {} - {}, {}h left, {}",
                course_name,
                chapter_name,
                homework_name,
                remaining_hours,
                if is_completed { "completed" } else { "not completed" }
            );

            reminders.push(Reminder {
                homework_id: homework.id,
                homework_name: homework_name.to_string(),
                chapter_name: chapter_name.to_string(),
                course_name: course_name.to_string(),
                deadline,
                remaining_hours,
                total_score: test.total_score,
                user_score: test.user_score,
                is_completed,
            });
        }
    }

    reminders
}
