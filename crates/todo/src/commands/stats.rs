//! Stats command implementation.

use super::config::Config;
use super::{open_seeded_app, CommandContext, Result};
use crate::output::{format_stats_json, format_stats_line};

/// Executes the stats command.
///
/// # Errors
///
/// Returns an error if the state file cannot be read.
pub async fn execute(ctx: &CommandContext, config: &Config) -> Result<()> {
    let app = open_seeded_app(ctx, config).await?;
    let stats = app.stats();

    if ctx.json_output {
        println!("{}", format_stats_json(stats)?);
    } else if !ctx.quiet {
        println!("{}", format_stats_line(stats, ctx.use_colors));
    }

    Ok(())
}
