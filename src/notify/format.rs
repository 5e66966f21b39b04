//! Reminder message rendering.

use crate::domain::Reminder;

const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RULE_WIDTH: usize = 60;

/// Subject line; urgent framing when any reminder is due within the hour.
pub fn build_subject(prefix: &str, reminders: &[Reminder]) -> String {
    let urgent = reminders.iter().filter(|r| r.is_urgent()).count();
    if urgent > 0 {
        format!("{} URGENT: {} homework due within 1 hour", prefix, urgent)
    } else {
        format!("{} {} homework reminder(s)", prefix, reminders.len())
    }
}

/// Plain-text body listing reminders, most urgent first.
pub fn build_body(reminders: &[Reminder]) -> String {
    let mut sorted: Vec<&Reminder> = reminders.iter().collect();
    sorted.sort_by_key(|r| r.remaining_hours);

    let rule = "=".repeat(RULE_WIDTH);
    let separator = "-".repeat(RULE_WIDTH);
    let mut body = String::new();

    body.push_str("Hello,\n\n");
    body.push_str("The following homework is due soon:\n\n");
    body.push_str(&format!("{}\n\n", rule));

    for (index, reminder) in sorted.iter().enumerate() {
        body.push_str(&format!("[Homework {}]\n", index + 1));
        body.push_str(&format!("Course:    {}\n", reminder.course_name));
        body.push_str(&format!("Chapter:   {}\n", reminder.chapter_name));
        body.push_str(&format!("Homework:  {}\n", reminder.homework_name));
        body.push_str(&format!("Deadline:  {}\n", reminder.deadline.format(DEADLINE_FORMAT)));
        body.push_str(&format!("Remaining: {}\n", reminder.formatted_remaining_time()));
        body.push_str(&format!("Status:    {}\n", reminder.completion_status()));
        if reminder.is_urgent() {
            body.push_str("WARNING: this homework closes within 1 hour, finish it now!\n");
        }
        body.push_str(&format!("\n{}\n\n", separator));
    }

    body.push_str("Tips:\n");
    body.push_str("1. Plan ahead and finish homework early\n");
    body.push_str("2. Leave time for unexpected problems\n");
    body.push_str("3. Confirm the submission went through\n\n");
    body.push_str(&format!("{}\n\n", rule));
    body.push_str("Sent automatically by moocnotify, please do not reply.\n");

    body
}
