//! Output formatting utilities for the todo CLI.
//!
//! This module provides functions for formatting data as tables or JSON:
//!
//! - [`todos`] - Todo output formatting (list, show, stats)
//! - [`helpers`] - Common formatting utilities (truncation, priority, markers)

pub mod helpers;
mod todos;

pub use todos::{
    format_stats_json, format_stats_line, format_todo_details_table, format_todo_json,
    format_todo_row, format_todos_json, format_todos_table,
};
