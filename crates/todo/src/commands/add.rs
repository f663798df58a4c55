//! Add command implementation.
//!
//! Creates a new todo at the top of the list. Priority and the featured flag
//! are applied right after creation.

use todo_store::Priority;

use super::config::Config;
use super::{open_seeded_app, CommandContext, Result};
use crate::output::{format_todo_json, format_todo_row};

/// Options for the add command.
#[derive(Debug)]
pub struct AddOptions {
    /// Todo text.
    pub text: String,
    /// Priority level, if not the default.
    pub priority: Option<Priority>,
    /// Mark as featured.
    pub featured: bool,
}

/// Executes the add command.
///
/// Blank text changes nothing and is reported, not treated as an error.
///
/// # Errors
///
/// Returns an error if the state file cannot be read or written.
pub async fn execute(ctx: &CommandContext, opts: &AddOptions, config: &Config) -> Result<()> {
    let mut app = open_seeded_app(ctx, config).await?;

    let Some(created) = app.add(&opts.text)? else {
        if !ctx.quiet {
            eprintln!("Nothing changed: todo text is blank.");
        }
        return Ok(());
    };

    if let Some(priority) = opts.priority {
        app.set_priority(&created.id, priority)?;
    }
    if opts.featured {
        app.toggle_featured(&created.id)?;
    }

    let Some(item) = app.list().get(&created.id) else {
        return Ok(());
    };

    if ctx.json_output {
        println!("{}", format_todo_json(item)?);
    } else if !ctx.quiet {
        println!("Added: {}", format_todo_row(item, ctx.use_colors));
    }

    Ok(())
}
