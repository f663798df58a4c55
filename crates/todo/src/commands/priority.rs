//! Priority command implementation.

use todo_store::Priority;

use super::config::Config;
use super::{open_seeded_app, resolve_id, CommandContext, Result};
use crate::output::helpers::{format_priority, truncate_id};

/// Executes the priority command.
///
/// # Errors
///
/// Returns an error if the reference does not resolve or the state file cannot be written.
pub async fn execute(
    ctx: &CommandContext,
    reference: &str,
    priority: Priority,
    config: &Config,
) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;
    let id = resolve_id(&app, reference)?;
    let changed = app.set_priority(&id, priority)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "id": id,
            "priority": priority.level(),
            "changed": changed,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        let text = app.list().get(&id).map(|item| item.text.as_str()).unwrap_or_default();
        let label = format_priority(priority, ctx.use_colors);
        if changed {
            println!("Priority set to {}: {} ({})", label, text, truncate_id(&id));
        } else {
            println!("Priority already {}: {} ({})", label, text, truncate_id(&id));
        }
    }

    Ok(())
}
