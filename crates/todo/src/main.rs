use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::{AppCommand, AppDispatch, LocalCommand, LocalDispatch};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "TODO_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `TODO_LOG` wins when set; otherwise `--verbose` means debug, `--quiet`
/// means errors only, and the default is warnings.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli.verbose, cli.quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color && std::env::var_os("NO_COLOR").is_none())
        .with_writer(std::io::stderr)
        .init();
}

fn default_log_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    // Commands that never touch the todo list (config, completions, help)
    if let Some(dispatch) = LocalDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    let config = load_config()?;
    let ctx = ctx.with_config(&config);

    match AppDispatch::from_cli(cli) {
        Some(dispatch) => dispatch.execute(&ctx, &config).await,
        None => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Store(_) => "STATE_ERROR",
        CommandError::Lookup(_) => "NOT_FOUND",
        CommandError::Seed(_) => "SEED_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Config(_) => ExitCode::from(5),
        CommandError::Lookup(_) => ExitCode::from(1),
        CommandError::Seed(_) => ExitCode::from(2),
        CommandError::Store(_) => ExitCode::from(5),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_store::{LookupError, StoreError};

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(false, false), "warn");
        assert_eq!(default_log_level(true, false), "debug");
        assert_eq!(default_log_level(false, true), "error");
    }

    #[test]
    fn test_error_codes() {
        let lookup = CommandError::Lookup(LookupError::NotFound {
            reference: "x".to_string(),
            suggestion: None,
        });
        assert_eq!(error_code(&lookup), "NOT_FOUND");
        assert_eq!(error_exit_code(&lookup), ExitCode::from(1));

        let store = CommandError::Store(StoreError::NoDataDir);
        assert_eq!(error_code(&store), "STATE_ERROR");
        assert_eq!(error_exit_code(&store), ExitCode::from(5));

        let config = CommandError::Config("bad".to_string());
        assert_eq!(error_code(&config), "CONFIG_ERROR");
        assert_eq!(error_exit_code(&config), ExitCode::from(5));

        let io = CommandError::Io(std::io::Error::other("disk"));
        assert_eq!(error_exit_code(&io), ExitCode::from(3));
    }

    #[test]
    fn test_lookup_error_message_is_passed_through() {
        let err = CommandError::Lookup(LookupError::NotFound {
            reference: "Buy mlk".to_string(),
            suggestion: Some("Buy milk".to_string()),
        });
        assert_eq!(
            err.to_string(),
            "todo 'Buy mlk' not found. Did you mean 'Buy milk'?"
        );
    }
}
