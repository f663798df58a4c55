//! Delete command implementation.
//!
//! Removes one or more todos, asking first when several are named.

use serde::Serialize;

use super::config::Config;
use super::{
    confirm_bulk_operation, open_seeded_app, resolve_refs, CommandContext, ConfirmResult, Result,
};
use crate::output::helpers::truncate_id;

/// Options for the delete command.
#[derive(Debug)]
pub struct DeleteOptions {
    /// Todo ids, id prefixes or exact texts.
    pub refs: Vec<String>,
    /// Skip confirmation prompt.
    pub force: bool,
}

/// Result of deleting a single todo.
#[derive(Debug, Serialize)]
struct DeleteResult {
    id: String,
    text: String,
    deleted: bool,
}

/// Executes the delete command.
///
/// # Errors
///
/// Returns an error if any reference does not resolve or the state file cannot be written.
pub async fn execute(ctx: &CommandContext, opts: &DeleteOptions, config: &Config) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;
    let resolved = resolve_refs(&app, &opts.refs)?;

    let short_ids: Vec<String> = resolved.iter().map(|(id, _)| truncate_id(id)).collect();
    let items_for_confirm: Vec<(&str, &str)> = short_ids
        .iter()
        .zip(&resolved)
        .map(|(short, (_, text))| (short.as_str(), text.as_str()))
        .collect();

    match confirm_bulk_operation("delete", &items_for_confirm, opts.force, ctx.quiet)? {
        ConfirmResult::Confirmed => {}
        ConfirmResult::Aborted => {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    let mut results = Vec::with_capacity(resolved.len());
    for (id, text) in resolved {
        // The same todo may be named twice; the second removal is a no-op
        let deleted = app.remove(&id)?;
        results.push(DeleteResult { id, text, deleted });
    }

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if !ctx.quiet {
        for result in results.iter().filter(|r| r.deleted) {
            println!("Deleted: {} ({})", result.text, truncate_id(&result.id));
        }
    }

    Ok(())
}
