//! Show command implementation.

use todo_store::lookup;

use super::config::Config;
use super::{open_seeded_app, CommandContext, Result};
use crate::output::{format_todo_details_table, format_todo_json};

/// Executes the show command.
///
/// # Errors
///
/// Returns an error if the reference does not resolve or the state file cannot be read.
pub async fn execute(ctx: &CommandContext, reference: &str, config: &Config) -> Result<()> {
    let app = open_seeded_app(ctx, config).await?;
    let item = lookup::resolve(app.list(), reference)?;

    if ctx.json_output {
        println!("{}", format_todo_json(item)?);
    } else if !ctx.quiet {
        print!("{}", format_todo_details_table(item, ctx.use_colors));
    }

    Ok(())
}
