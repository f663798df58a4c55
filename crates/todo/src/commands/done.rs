//! Done command implementation.
//!
//! Toggles completion of one or more todos: open todos are completed and
//! completed ones are reopened.

use serde::Serialize;

use super::config::Config;
use super::{open_seeded_app, resolve_refs, CommandContext, Result};
use crate::output::helpers::truncate_id;

/// Result of toggling a single todo.
#[derive(Debug, Serialize)]
pub struct ToggleResult {
    /// The todo id.
    pub id: String,
    /// The todo text.
    pub text: String,
    /// The flag value after the toggle.
    pub value: bool,
}

/// Executes the done command.
///
/// # Errors
///
/// Returns an error if any reference does not resolve (nothing is changed in
/// that case) or the state file cannot be written.
pub async fn execute(ctx: &CommandContext, refs: &[String], config: &Config) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;
    let resolved = resolve_refs(&app, refs)?;

    let mut results = Vec::with_capacity(resolved.len());
    for (id, text) in resolved {
        app.toggle_completed(&id)?;
        let value = app.list().get(&id).is_some_and(|item| item.completed);
        results.push(ToggleResult { id, text, value });
    }

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if !ctx.quiet {
        for result in &results {
            let verb = if result.value { "Completed" } else { "Reopened" };
            println!("{}: {} ({})", verb, result.text, truncate_id(&result.id));
        }
    }

    Ok(())
}
