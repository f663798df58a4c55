//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands split into two groups: those that never open the state file
//! (config, completions, help) and those that work on the todo list.

use todo_store::Priority;

use crate::cli::{Cli, Commands, ConfigCommands, Shell, ThemeCommands};
use crate::commands::config::Config;
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without the todo list.
pub trait LocalCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that work on the todo list.
#[allow(async_fn_in_trait)]
pub trait AppCommand {
    /// Execute the command with the loaded configuration.
    async fn execute(&self, ctx: &CommandContext, config: &Config) -> Result<()>;
}

/// Commands that don't open the state file.
pub enum LocalDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Try to create a local dispatch from the CLI command.
    /// Returns None if the command needs the todo list.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config {
                command: Some(ConfigCommands::Edit),
            }) => None,
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl LocalCommand for LocalDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("todo - terminal todo list");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch the synchronous config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Edit) => Err(CommandError::Config(
            "edit requires async context".into(),
        )),
    }
}

/// Commands that work on the todo list.
pub enum AppDispatch<'a> {
    List {
        search: &'a Option<String>,
        featured: bool,
        status: crate::cli::StatusArg,
    },
    Add {
        text: &'a str,
        priority: Option<Priority>,
        featured: bool,
    },
    Show {
        todo: &'a str,
    },
    Edit {
        todo: &'a str,
        text: &'a str,
    },
    Done {
        todos: &'a [String],
    },
    Star {
        todos: &'a [String],
    },
    Priority {
        todo: &'a str,
        level: Priority,
    },
    Delete {
        todos: &'a [String],
        force: bool,
    },
    Clear {
        force: bool,
    },
    Move {
        dragged: &'a str,
        target: &'a str,
    },
    Sort {
        priority_only: bool,
    },
    Stats,
    Seed {
        force: bool,
    },
    Theme(Option<ThemeCommands>),
    /// Async, but never opens the state file.
    ConfigEdit,
}

impl<'a> AppDispatch<'a> {
    /// Create an app dispatch from the CLI command.
    /// Returns None for commands handled by [`LocalDispatch`].
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::List {
                search,
                featured,
                status,
            }) => Some(Self::List {
                search,
                featured: *featured,
                status: *status,
            }),
            Some(Commands::Add {
                text,
                priority,
                featured,
            }) => Some(Self::Add {
                text,
                priority: *priority,
                featured: *featured,
            }),
            Some(Commands::Show { todo }) => Some(Self::Show { todo }),
            Some(Commands::Edit { todo, text }) => Some(Self::Edit { todo, text }),
            Some(Commands::Done { todos }) => Some(Self::Done { todos }),
            Some(Commands::Star { todos }) => Some(Self::Star { todos }),
            Some(Commands::Priority { todo, level }) => Some(Self::Priority {
                todo,
                level: *level,
            }),
            Some(Commands::Delete { todos, force }) => Some(Self::Delete {
                todos,
                force: *force,
            }),
            Some(Commands::Clear { force }) => Some(Self::Clear { force: *force }),
            Some(Commands::Move { dragged, target }) => Some(Self::Move { dragged, target }),
            Some(Commands::Sort { priority_only }) => Some(Self::Sort {
                priority_only: *priority_only,
            }),
            Some(Commands::Stats) => Some(Self::Stats),
            Some(Commands::Seed { force }) => Some(Self::Seed { force: *force }),
            Some(Commands::Theme { command }) => Some(Self::Theme(*command)),
            Some(Commands::Config {
                command: Some(ConfigCommands::Edit),
            }) => Some(Self::ConfigEdit),
            // Already handled by LocalDispatch
            Some(Commands::Config { .. }) | Some(Commands::Completions { .. }) | None => None,
        }
    }
}

impl AppCommand for AppDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext, config: &Config) -> Result<()> {
        match self {
            Self::List {
                search,
                featured,
                status,
            } => {
                let opts = commands::list::ListOptions {
                    search: (*search).clone(),
                    featured: *featured,
                    status: (*status).into(),
                };
                commands::list::execute(ctx, &opts, config).await
            }
            Self::Add {
                text,
                priority,
                featured,
            } => {
                let opts = commands::add::AddOptions {
                    text: text.to_string(),
                    priority: *priority,
                    featured: *featured,
                };
                commands::add::execute(ctx, &opts, config).await
            }
            Self::Show { todo } => commands::show::execute(ctx, todo, config).await,
            Self::Edit { todo, text } => {
                let opts = commands::edit::EditOptions {
                    reference: todo.to_string(),
                    text: text.to_string(),
                };
                commands::edit::execute(ctx, &opts, config).await
            }
            Self::Done { todos } => commands::done::execute(ctx, todos, config).await,
            Self::Star { todos } => commands::star::execute(ctx, todos, config).await,
            Self::Priority { todo, level } => {
                commands::priority::execute(ctx, todo, *level, config).await
            }
            Self::Delete { todos, force } => {
                let opts = commands::delete::DeleteOptions {
                    refs: todos.to_vec(),
                    force: *force,
                };
                commands::delete::execute(ctx, &opts, config).await
            }
            Self::Clear { force } => commands::clear::execute(ctx, *force, config).await,
            Self::Move { dragged, target } => {
                commands::reorder::execute(ctx, dragged, target, config).await
            }
            Self::Sort { priority_only } => {
                commands::sort::execute(ctx, *priority_only, config).await
            }
            Self::Stats => commands::stats::execute(ctx, config).await,
            Self::Seed { force } => commands::seed::execute(ctx, *force, config).await,
            Self::Theme(command) => commands::theme::execute(ctx, *command, config),
            Self::ConfigEdit => commands::config::execute_edit(ctx).await,
        }
    }
}
