//! Star command implementation.
//!
//! Toggles the featured flag of one or more todos.

use super::config::Config;
use super::done::ToggleResult;
use super::{open_seeded_app, resolve_refs, CommandContext, Result};
use crate::output::helpers::truncate_id;

/// Executes the star command.
///
/// # Errors
///
/// Returns an error if any reference does not resolve or the state file cannot be written.
pub async fn execute(ctx: &CommandContext, refs: &[String], config: &Config) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;
    let resolved = resolve_refs(&app, refs)?;

    let mut results = Vec::with_capacity(resolved.len());
    for (id, text) in resolved {
        app.toggle_featured(&id)?;
        let value = app.list().get(&id).is_some_and(|item| item.featured);
        results.push(ToggleResult { id, text, value });
    }

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if !ctx.quiet {
        for result in &results {
            let verb = if result.value { "Starred" } else { "Unstarred" };
            println!("{}: {} ({})", verb, result.text, truncate_id(&result.id));
        }
    }

    Ok(())
}
