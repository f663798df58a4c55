//! Theme command implementation.
//!
//! Shows or changes the dark-mode preference stored alongside the todos.

use todo_store::TodoApp;

use super::config::Config;
use super::{open_app, CommandContext, Result};
use crate::cli::ThemeCommands;

/// Executes the theme command.
///
/// # Errors
///
/// Returns an error if the state file cannot be read or written.
pub fn execute(ctx: &CommandContext, command: Option<ThemeCommands>, config: &Config) -> Result<()> {
    let mut app = open_app(ctx, config)?;

    let changed = match command.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => false,
        ThemeCommands::Dark => app.set_dark_mode(true)?,
        ThemeCommands::Light => app.set_dark_mode(false)?,
        ThemeCommands::Toggle => {
            app.toggle_dark_mode()?;
            true
        }
    };

    if ctx.json_output {
        let output = serde_json::json!({
            "dark_mode": app.dark_mode(),
            "source": source(&app),
            "changed": changed,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Theme: {} ({})", mode_name(app.dark_mode()), source(&app));
    }

    Ok(())
}

fn mode_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

fn source(app: &TodoApp) -> &'static str {
    if app.theme().is_explicit() {
        "saved"
    } else {
        "system"
    }
}
