//! Clear command implementation.
//!
//! Deletes every completed todo.

use super::config::Config;
use super::{confirm, open_seeded_app, CommandContext, ConfirmResult, Result};

/// Executes the clear command.
///
/// # Errors
///
/// Returns an error if the state file cannot be read or written.
pub async fn execute(ctx: &CommandContext, force: bool, config: &Config) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;
    let completed = app.stats().completed;

    if completed > 0 && !force {
        let prompt = format!("Delete {} completed todos?", completed);
        if confirm(&prompt)? == ConfirmResult::Aborted {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    let removed = app.clear_completed()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "removed": removed,
            "stats": app.stats(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if removed == 0 {
            println!("No completed todos.");
        } else {
            println!("Cleared {} completed todos.", removed);
        }
    }

    Ok(())
}
