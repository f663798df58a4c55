//! Todo output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use todo_store::{Stats, TodoItem, ViewFilter};

use super::helpers::{
    format_check, format_datetime, format_priority, format_priority_verbose, format_star,
    format_text, truncate_id, truncate_str,
};

/// Maximum text width in list rows.
const MAX_TEXT_WIDTH: usize = 60;

/// JSON output structure for list command.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub todos: Vec<TodoOutput<'a>>,
    pub filter: FilterOutput<'a>,
    pub stats: Stats,
}

/// JSON output structure for a single todo.
#[derive(Serialize)]
pub struct TodoOutput<'a> {
    pub id: &'a str,
    pub text: &'a str,
    pub completed: bool,
    pub featured: bool,
    pub priority: u8,
    pub created_at: String,
}

impl<'a> From<&'a TodoItem> for TodoOutput<'a> {
    fn from(item: &'a TodoItem) -> Self {
        Self {
            id: &item.id,
            text: &item.text,
            completed: item.completed,
            featured: item.featured,
            priority: item.priority.level(),
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

/// JSON output for the active filter.
#[derive(Serialize)]
pub struct FilterOutput<'a> {
    pub search: &'a str,
    pub featured_only: bool,
    pub status: String,
}

/// Formats a list of todos as JSON.
pub fn format_todos_json(
    items: &[&TodoItem],
    filter: &ViewFilter,
    stats: Stats,
) -> Result<String, serde_json::Error> {
    let output = ListOutput {
        todos: items.iter().map(|item| TodoOutput::from(*item)).collect(),
        filter: FilterOutput {
            search: &filter.search,
            featured_only: filter.featured_only,
            status: filter.status.to_string(),
        },
        stats,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats a single todo as JSON.
pub fn format_todo_json(item: &TodoItem) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TodoOutput::from(item))
}

/// Formats one list row.
pub fn format_todo_row(item: &TodoItem, use_colors: bool) -> String {
    let id = format!("{:<8}", truncate_id(&item.id));
    let id = if use_colors {
        id.dimmed().to_string()
    } else {
        id
    };

    format!(
        "{} {} {}  {}  {}",
        format_check(item.completed, use_colors),
        format_star(item.featured, use_colors),
        id,
        format_priority(item.priority, use_colors),
        format_text(
            &truncate_str(&item.text, MAX_TEXT_WIDTH),
            item.completed,
            use_colors
        ),
    )
}

/// Formats a list of todos as a table followed by a stats footer.
///
/// `filter_active` selects the empty-state message.
pub fn format_todos_table(
    items: &[&TodoItem],
    stats: Stats,
    filter_active: bool,
    use_colors: bool,
) -> String {
    let mut output = String::new();

    if items.is_empty() {
        let message = if filter_active {
            "No todos match the current filter."
        } else {
            "No todos yet. Add one with 'todo add <text>'."
        };
        output.push_str(message);
        output.push('\n');
    } else {
        for item in items {
            output.push_str(&format_todo_row(item, use_colors));
            output.push('\n');
        }
    }

    output.push('\n');
    output.push_str(&format_stats_line(stats, use_colors));
    output.push('\n');
    output
}

/// Formats todo details for the show command.
pub fn format_todo_details_table(item: &TodoItem, use_colors: bool) -> String {
    let title = if use_colors {
        item.text.bold().to_string()
    } else {
        item.text.clone()
    };
    let status = if item.completed { "completed" } else { "active" };

    let mut output = String::new();
    output.push_str(&format!("{}\n\n", title));
    output.push_str(&format!("ID:        {}\n", item.id));
    output.push_str(&format!("Status:    {}\n", status));
    output.push_str(&format!(
        "Priority:  {}\n",
        format_priority_verbose(item.priority, use_colors)
    ));
    output.push_str(&format!(
        "Featured:  {}\n",
        if item.featured { "yes" } else { "no" }
    ));
    output.push_str(&format!("Created:   {}\n", format_datetime(&item.created_at)));
    output
}

/// Formats the one-line stats summary.
pub fn format_stats_line(stats: Stats, use_colors: bool) -> String {
    let line = format!(
        "Total: {}  Completed: {}  Active: {}",
        stats.total, stats.completed, stats.active
    );
    if use_colors {
        line.dimmed().to_string()
    } else {
        line
    }
}

/// Formats stats as JSON.
pub fn format_stats_json(stats: Stats) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&stats)
}
