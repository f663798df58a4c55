//! Seed command implementation.
//!
//! Loads sample todos on demand. Without `--force` it only runs while the
//! profile has never been saved; with `--force` it replaces the current list.

use super::config::Config;
use super::{open_app, seed_client, CommandContext, Result};

/// Executes the seed command.
///
/// An unreachable or failing source is logged and reported as zero todos
/// loaded; it is not an error.
///
/// # Errors
///
/// Returns an error if the state file cannot be read or written.
pub async fn execute(ctx: &CommandContext, force: bool, config: &Config) -> Result<()> {
    let mut app = open_app(ctx, config)?;

    if !force && !app.needs_seed() {
        if ctx.json_output {
            let output = serde_json::json!({ "loaded": 0, "skipped": true });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if !ctx.quiet {
            println!("Todos already exist. Use --force to replace them with samples.");
        }
        return Ok(());
    }

    let client = seed_client(config)?;
    tracing::debug!(url = %client.todos_url(), force, "loading sample todos");

    let loaded = if force {
        app.reseed(&client).await?
    } else {
        app.seed(&client).await?
    };

    if ctx.json_output {
        let output = serde_json::json!({ "loaded": loaded, "skipped": false });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if loaded == 0 {
            println!("No sample todos loaded.");
        } else {
            println!("Loaded {} sample todos.", loaded);
        }
    }

    Ok(())
}
