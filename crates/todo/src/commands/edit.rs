//! Edit command implementation.
//!
//! Replaces the text of a single todo.

use super::config::Config;
use super::{open_seeded_app, resolve_id, CommandContext, Result};
use crate::output::{format_todo_json, format_todo_row};

/// Options for the edit command.
#[derive(Debug)]
pub struct EditOptions {
    /// Todo id, id prefix or exact text.
    pub reference: String,
    /// Replacement text.
    pub text: String,
}

/// Executes the edit command.
///
/// Blank replacement text changes nothing and is reported, not treated as an error.
///
/// # Errors
///
/// Returns an error if the reference does not resolve or the state file cannot be written.
pub async fn execute(ctx: &CommandContext, opts: &EditOptions, config: &Config) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;
    let id = resolve_id(&app, &opts.reference)?;

    if !app.edit_text(&id, &opts.text)? {
        if !ctx.quiet {
            eprintln!("Nothing changed: todo text is blank.");
        }
        return Ok(());
    }

    let Some(item) = app.list().get(&id) else {
        return Ok(());
    };

    if ctx.json_output {
        println!("{}", format_todo_json(item)?);
    } else if !ctx.quiet {
        println!("Updated: {}", format_todo_row(item, ctx.use_colors));
    }

    Ok(())
}
