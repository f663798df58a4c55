//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the todo CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use todo_store::{Priority, StatusFilter};

/// todo - A terminal todo list
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path of the state file (default: ~/.local/share/todo/state.json)
    #[arg(long, global = true, env = "TODO_STATE")]
    pub state: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List todos
    #[command(alias = "ls")]
    List {
        /// Only show todos whose text contains this (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only show featured todos
        #[arg(short, long)]
        featured: bool,

        /// Restrict by completion status
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
    },

    /// Add a new todo
    #[command(alias = "a")]
    Add {
        /// Todo text
        text: String,

        /// Priority level (1=high, 3=low)
        #[arg(short = 'P', long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Mark as featured
        #[arg(short, long)]
        featured: bool,
    },

    /// Show todo details
    #[command(alias = "s")]
    Show {
        /// Todo id, id prefix or exact text
        todo: String,
    },

    /// Replace the text of a todo
    #[command(alias = "e")]
    Edit {
        /// Todo id, id prefix or exact text
        todo: String,

        /// New text
        text: String,
    },

    /// Toggle completion of todo(s)
    #[command(alias = "d")]
    Done {
        /// Todo ids, id prefixes or exact texts
        #[arg(required = true)]
        todos: Vec<String>,
    },

    /// Toggle the featured flag of todo(s)
    Star {
        /// Todo ids, id prefixes or exact texts
        #[arg(required = true)]
        todos: Vec<String>,
    },

    /// Set the priority of a todo
    #[command(alias = "p")]
    Priority {
        /// Todo id, id prefix or exact text
        todo: String,

        /// Priority level (1=high, 3=low)
        #[arg(value_parser = parse_priority)]
        level: Priority,
    },

    /// Delete todo(s)
    #[command(alias = "rm")]
    Delete {
        /// Todo ids, id prefixes or exact texts
        #[arg(required = true)]
        todos: Vec<String>,

        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },

    /// Delete all completed todos
    Clear {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },

    /// Move a todo to another todo's position
    #[command(alias = "mv")]
    Move {
        /// The todo to move
        dragged: String,

        /// The todo whose position it takes
        target: String,
    },

    /// Sort todos by priority
    Sort {
        /// Ignore completion and sort by priority alone
        #[arg(long)]
        priority_only: bool,
    },

    /// Show completion counts
    Stats,

    /// Load sample todos
    Seed {
        /// Replace existing todos with fresh samples
        #[arg(long)]
        force: bool,
    },

    /// Show or change the dark-mode preference
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// View and edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Status values for the list command
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusArg {
    All,
    Active,
    #[value(alias = "done")]
    Completed,
}

impl From<StatusArg> for StatusFilter {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::All => StatusFilter::All,
            StatusArg::Active => StatusFilter::Active,
            StatusArg::Completed => StatusFilter::Completed,
        }
    }
}

/// Parses a priority level argument (1, 2 or 3).
fn parse_priority(value: &str) -> Result<Priority, String> {
    let level: u8 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a priority level"))?;
    Priority::try_from(level).map_err(|e| e.to_string())
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Theme subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeCommands {
    /// Show the current preference (default)
    Show,

    /// Switch dark mode on
    Dark,

    /// Switch dark mode off
    Light,

    /// Flip dark mode
    Toggle,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Open config in $EDITOR
    Edit,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print config file path
    Path,
}
