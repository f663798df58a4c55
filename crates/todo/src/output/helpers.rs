//! Common helper functions for output formatting.

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;
use todo_store::Priority;

/// Truncates an ID to 8 characters for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Truncates a string to a maximum length in characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats priority for display.
pub fn format_priority(priority: Priority, use_colors: bool) -> String {
    let label = format!("P{}", priority.level());

    if use_colors {
        match priority {
            Priority::High => label.red().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::Low => label.blue().to_string(),
        }
    } else {
        label
    }
}

/// Formats priority for verbose display (show command).
pub fn format_priority_verbose(priority: Priority, use_colors: bool) -> String {
    let label = format!("P{} ({})", priority.level(), priority.label());

    if use_colors {
        match priority {
            Priority::High => label.red().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::Low => label.blue().to_string(),
        }
    } else {
        label
    }
}

/// Formats the completion checkbox.
pub fn format_check(completed: bool, use_colors: bool) -> String {
    match (completed, use_colors) {
        (true, true) => "[x]".green().to_string(),
        (true, false) => "[x]".to_string(),
        (false, _) => "[ ]".to_string(),
    }
}

/// Formats the featured marker.
pub fn format_star(featured: bool, use_colors: bool) -> String {
    match (featured, use_colors) {
        (true, true) => "*".yellow().bold().to_string(),
        (true, false) => "*".to_string(),
        (false, _) => " ".to_string(),
    }
}

/// Formats todo text, striking through completed ones when colored.
pub fn format_text(text: &str, completed: bool, use_colors: bool) -> String {
    if completed && use_colors {
        text.strikethrough().dimmed().to_string()
    } else {
        text.to_string()
    }
}

/// Formats a creation timestamp in local time.
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
