//! Move command implementation.
//!
//! Moves one todo to the position another todo occupies, the terminal
//! counterpart of drag and drop.

use super::config::Config;
use super::{open_seeded_app, resolve_id, CommandContext, Result};
use crate::output::helpers::truncate_id;

/// Executes the move command.
///
/// # Errors
///
/// Returns an error if either reference does not resolve or the state file
/// cannot be written.
pub async fn execute(
    ctx: &CommandContext,
    dragged: &str,
    target: &str,
    config: &Config,
) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;
    let dragged_id = resolve_id(&app, dragged)?;
    let target_id = resolve_id(&app, target)?;

    let changed = app.reorder(&dragged_id, &target_id)?;
    let position = app.list().position(&dragged_id).map(|index| index + 1);

    if ctx.json_output {
        let output = serde_json::json!({
            "id": dragged_id,
            "position": position,
            "changed": changed,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        match (changed, position) {
            (true, Some(position)) => {
                println!("Moved {} to position {}.", truncate_id(&dragged_id), position)
            }
            _ => println!("Nothing changed."),
        }
    }

    Ok(())
}
