//! Command implementations for the todo CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod add;
pub mod clear;
pub mod completions;
pub mod config;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod priority;
pub mod reorder;
pub mod seed;
pub mod show;
pub mod sort;
pub mod star;
pub mod stats;
pub mod theme;

use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use dialoguer::Confirm;
use todo_seed::SeedClient;
use todo_store::lookup;
use todo_store::{StateStore, TodoApp};

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// State file error.
    #[error("state error: {0}")]
    Store(#[from] todo_store::StoreError),

    /// Todo reference did not resolve.
    #[error("{0}")]
    Lookup(#[from] todo_store::LookupError),

    /// Seed client setup error.
    #[error("seed error: {0}")]
    Seed(#[from] todo_seed::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// State file override from `--state` / `TODO_STATE`.
    pub state_path: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            state_path: cli.state.clone(),
        }
    }

    /// Applies config-file output preferences. Flags still win.
    pub fn with_config(mut self, config: &Config) -> Self {
        if config.output.color == Some(false) {
            self.use_colors = false;
        }
        self
    }

    /// The state store for this invocation.
    pub fn state_store(&self) -> Result<StateStore> {
        match &self.state_path {
            Some(path) => Ok(StateStore::with_path(path.clone())),
            None => Ok(StateStore::new()?),
        }
    }
}

/// Opens the profile without touching the network.
pub fn open_app(ctx: &CommandContext, config: &Config) -> Result<TodoApp> {
    let store = ctx.state_store()?;
    tracing::debug!(path = %store.path().display(), "opening state");
    prepare_app(TodoApp::open(store)?, config)
}

/// Applies the configured sort order and logs app events.
fn prepare_app(app: TodoApp, config: &Config) -> Result<TodoApp> {
    let mut app = app.with_sort_order(config.sort_order()?);
    app.subscribe(|event| tracing::debug!(?event, "app event"));
    Ok(app)
}

/// Opens the profile, loading sample todos on first run.
///
/// A failing seed source leaves the list empty; only state file errors
/// surface.
pub async fn open_seeded_app(ctx: &CommandContext, config: &Config) -> Result<TodoApp> {
    let store = ctx.state_store()?;
    tracing::debug!(path = %store.path().display(), "opening state");
    let mut app = prepare_app(TodoApp::open_async(store).await?, config)?;
    if app.needs_seed() && config.seed_enabled() {
        let client = seed_client(config)?;
        let count = app.seed(&client).await?;
        if count > 0 && !ctx.quiet && !ctx.json_output {
            eprintln!("Loaded {} sample todos.", count);
        }
    }
    Ok(app)
}

/// Builds the seed client from config.
pub fn seed_client(config: &Config) -> Result<SeedClient> {
    Ok(SeedClient::with_base_url(config.seed_url())?.with_limit(config.seed_limit()))
}

/// Resolves todo references to owned `(id, text)` pairs.
///
/// The pairs are owned so that the app can be mutated afterwards.
pub fn resolve_refs(app: &TodoApp, refs: &[String]) -> Result<Vec<(String, String)>> {
    let items = lookup::resolve_all(app.list(), refs)?;
    Ok(items
        .into_iter()
        .map(|item| (item.id.clone(), item.text.clone()))
        .collect())
}

/// Resolves a single todo reference to its id.
pub fn resolve_id(app: &TodoApp, reference: &str) -> Result<String> {
    Ok(lookup::resolve(app.list(), reference)?.id.clone())
}

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    /// Go ahead.
    Confirmed,
    /// The user declined.
    Aborted,
}

/// Asks before an operation touching several todos.
///
/// Skipped with `force`, for a single todo, and when stdin is not a terminal.
pub fn confirm_bulk_operation(
    action: &str,
    items: &[(&str, &str)],
    force: bool,
    quiet: bool,
) -> Result<ConfirmResult> {
    if force || items.len() <= 1 {
        return Ok(ConfirmResult::Confirmed);
    }

    if !quiet {
        eprintln!("About to {} {} todos:", action, items.len());
        for (id, text) in items {
            eprintln!("  {}  {}", id, text);
        }
    }

    confirm(&format!("{} {} todos?", capitalize(action), items.len()))
}

/// Asks a yes/no question, defaulting to no.
///
/// Non-interactive sessions are treated as confirmed.
pub fn confirm(prompt: &str) -> Result<ConfirmResult> {
    if !io::stdin().is_terminal() {
        return Ok(ConfirmResult::Confirmed);
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|dialoguer::Error::IO(e)| e)?;

    Ok(if confirmed {
        ConfirmResult::Confirmed
    } else {
        ConfirmResult::Aborted
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
