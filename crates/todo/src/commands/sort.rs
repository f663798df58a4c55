//! Sort command implementation.

use todo_store::SortOrder;

use super::config::Config;
use super::{open_seeded_app, CommandContext, Result};

/// Executes the sort command.
///
/// `priority_only` overrides the configured order for this run.
///
/// # Errors
///
/// Returns an error if the state file cannot be read or written.
pub async fn execute(ctx: &CommandContext, priority_only: bool, config: &Config) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;
    if priority_only {
        app = app.with_sort_order(SortOrder::PriorityOnly);
    }

    let changed = app.sort_by_priority()?;

    if ctx.json_output {
        let ids: Vec<&str> = app.list().iter().map(|item| item.id.as_str()).collect();
        let output = serde_json::json!({
            "order": app.sort_order(),
            "changed": changed,
            "ids": ids,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if changed {
            println!("Sorted {} todos by priority.", app.list().len());
        } else {
            println!("Already sorted.");
        }
    }

    Ok(())
}
