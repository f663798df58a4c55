//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/todo/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use tokio::process::Command;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use todo_seed::client::{BASE_URL, DEFAULT_LIMIT};
use todo_store::SortOrder;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "TODO_CONFIG";

/// Environment variable overriding the seed endpoint base URL.
const SEED_URL_ENV: &str = "TODO_SEED_URL";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# todo - terminal todo list configuration

# Config schema version (do not modify)
version = 1

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)

# Ordering used by `todo sort`
[sort]
# order = "completed-last"  # "completed-last" or "priority"

# Sample todos loaded on first run
[seed]
# enabled = true
# url = "https://jsonplaceholder.typicode.com"   # TODO_SEED_URL overrides
# limit = 5
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Sort settings.
    #[serde(default)]
    pub sort: SortConfig,

    /// Seed settings.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            output: OutputConfig::default(),
            sort: SortConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Sort configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SortConfig {
    /// "completed-last" or "priority".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// Seed configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Load sample todos on first run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Base URL of the sample endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// How many samples to request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Config {
    /// The configured sort order.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Config` if the file holds an unknown order.
    pub fn sort_order(&self) -> Result<SortOrder> {
        match self.sort.order.as_deref() {
            None => Ok(SortOrder::default()),
            Some(value) => parse_sort_order(value),
        }
    }

    /// Whether first-run seeding is on.
    pub fn seed_enabled(&self) -> bool {
        self.seed.enabled.unwrap_or(true)
    }

    /// The seed base URL: `TODO_SEED_URL`, then the file, then the public default.
    pub fn seed_url(&self) -> String {
        env::var(SEED_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.seed.url.clone())
            .unwrap_or_else(|| BASE_URL.to_string())
    }

    /// How many samples to request.
    pub fn seed_limit(&self) -> u32 {
        self.seed.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/todo/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var(CONFIG_ENV) {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    // Use XDG_CONFIG_HOME if set, otherwise ~/.config/todo
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("todo"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("todo"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    tracing::debug!(path = %path.display(), version = config.version, "loaded config");
    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    // Version 1 is the only schema so far
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
            "effective": {
                "sort_order": config.sort_order()?,
                "seed_enabled": config.seed_enabled(),
                "seed_url": config.seed_url(),
                "seed_limit": config.seed_limit(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }

            println!("\n[sort]");
            if let Some(ref order) = config.sort.order {
                println!("  order: {}", order);
            }

            println!("\n[seed]");
            if let Some(enabled) = config.seed.enabled {
                println!("  enabled: {}", enabled);
            }
            if let Some(ref url) = config.seed.url {
                println!("  url: {}", url);
            }
            if let Some(limit) = config.seed.limit {
                println!("  limit: {}", limit);
            }
        } else {
            println!("(No config file exists. Run 'todo config edit' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config edit command.
pub async fn execute_edit(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    // Create default config if it doesn't exist
    if !path.exists() {
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;

        if !ctx.quiet && !ctx.json_output {
            eprintln!("Created default config at: {}", path.display());
        }
    }

    let editor = env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| "vi".to_string());

    tracing::debug!(path = %path.display(), %editor, "opening config in editor");

    // Open editor (async to avoid blocking the tokio runtime)
    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .await
        .map_err(|e| CommandError::Config(format!("Failed to open editor '{}': {}", editor, e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if status.success() { "success" } else { "error" },
            "editor": editor,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if status.success() {
            println!("Config saved.");
        } else {
            eprintln!("Editor exited with error");
        }
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Applies a `section.field = value` assignment to `config`.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key.split_once('.') {
        Some(("output", "color")) => {
            config.output.color = Some(parse_bool(value)?);
        }
        Some(("sort", "order")) => {
            parse_sort_order(value)?;
            config.sort.order = Some(value.to_string());
        }
        Some(("seed", "enabled")) => {
            config.seed.enabled = Some(parse_bool(value)?);
        }
        Some(("seed", "url")) => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(CommandError::Config(format!(
                    "Invalid seed.url '{}'. Expected an http:// or https:// URL",
                    value
                )));
            }
            config.seed.url = Some(value.to_string());
        }
        Some(("seed", "limit")) => {
            let limit: u32 = value.parse().map_err(|_| {
                CommandError::Config(format!(
                    "Invalid seed.limit '{}'. Expected a non-negative integer",
                    value
                ))
            })?;
            config.seed.limit = Some(limit);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: output.color, sort.order, seed.enabled, seed.url, seed.limit",
                key
            )));
        }
    }
    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses a sort order name.
fn parse_sort_order(s: &str) -> Result<SortOrder> {
    match s.to_lowercase().as_str() {
        "completed-last" => Ok(SortOrder::CompletedLast),
        "priority" | "priority-only" => Ok(SortOrder::PriorityOnly),
        _ => Err(CommandError::Config(format!(
            "Invalid sort.order value '{}'. Valid values: completed-last, priority",
            s
        ))),
    }
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_bool_values() {
        for value in ["true", "True", "yes", "1", "on"] {
            assert!(parse_bool(value).unwrap(), "{value}");
        }
        for value in ["false", "FALSE", "no", "0", "off"] {
            assert!(!parse_bool(value).unwrap(), "{value}");
        }
        assert!(parse_bool("maybe").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!(
            parse_sort_order("completed-last").unwrap(),
            SortOrder::CompletedLast
        );
        assert_eq!(parse_sort_order("priority").unwrap(), SortOrder::PriorityOnly);
        assert_eq!(
            parse_sort_order("Priority-Only").unwrap(),
            SortOrder::PriorityOnly
        );
        assert!(parse_sort_order("alphabetical").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.output.color.is_none());
        assert_eq!(config.sort_order().unwrap(), SortOrder::CompletedLast);
        assert!(config.seed_enabled());
        assert_eq!(config.seed_limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            version: CONFIG_VERSION,
            output: OutputConfig { color: Some(true) },
            sort: SortConfig {
                order: Some("priority".to_string()),
            },
            seed: SeedConfig {
                enabled: Some(false),
                url: None,
                limit: Some(10),
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("color = true"));
        assert!(toml_str.contains("[sort]"));
        assert!(toml_str.contains("order = \"priority\""));
        assert!(toml_str.contains("limit = 10"));
        assert!(!toml_str.contains("url"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1

[output]
color = false

[sort]
order = "priority"

[seed]
enabled = true
url = "http://localhost:8080"
limit = 3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.sort_order().unwrap(), SortOrder::PriorityOnly);
        assert!(config.seed_enabled());
        assert_eq!(config.seed.url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.seed_limit(), 3);
    }

    #[test]
    fn test_config_deserialization_empty() {
        let config: Config = toml::from_str("").unwrap();
        // Missing version defaults to current version
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.sort.order.is_none());
        assert!(config.seed.enabled.is_none());
    }

    #[test]
    fn test_invalid_sort_order_in_file() {
        let config: Config = toml::from_str("[sort]\norder = \"random\"").unwrap();
        assert!(config.sort_order().is_err());
    }

    #[test]
    fn test_apply_setting() {
        let mut config = Config::default();

        apply_setting(&mut config, "output.color", "off").unwrap();
        apply_setting(&mut config, "sort.order", "priority").unwrap();
        apply_setting(&mut config, "seed.enabled", "no").unwrap();
        apply_setting(&mut config, "seed.url", "http://127.0.0.1:3000").unwrap();
        apply_setting(&mut config, "seed.limit", "8").unwrap();

        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.sort.order.as_deref(), Some("priority"));
        assert_eq!(config.seed.enabled, Some(false));
        assert_eq!(config.seed.url.as_deref(), Some("http://127.0.0.1:3000"));
        assert_eq!(config.seed.limit, Some(8));
    }

    #[test]
    fn test_apply_setting_rejects_bad_input() {
        let mut config = Config::default();

        assert!(apply_setting(&mut config, "token", "x").is_err());
        assert!(apply_setting(&mut config, "sort.order", "random").is_err());
        assert!(apply_setting(&mut config, "seed.url", "ftp://x").is_err());
        assert!(apply_setting(&mut config, "seed.limit", "-1").is_err());
        assert!(config.sort.order.is_none());
    }

    #[test]
    fn test_migrate_config_preserves_data() {
        let config = Config {
            version: 0,
            output: OutputConfig { color: Some(true) },
            sort: SortConfig::default(),
            seed: SeedConfig {
                enabled: Some(false),
                url: None,
                limit: None,
            },
        };

        let migrated = migrate_config(config).unwrap();
        assert_eq!(migrated.version, CONFIG_VERSION);
        assert_eq!(migrated.output.color, Some(true));
        assert_eq!(migrated.seed.enabled, Some(false));
    }

    #[test]
    #[serial]
    fn test_seed_url_resolution_order() {
        let original = env::var(SEED_URL_ENV).ok();
        env::remove_var(SEED_URL_ENV);

        let mut config = Config::default();
        let default_url = config.seed_url();
        config.seed.url = Some("http://from-file".to_string());
        let file_url = config.seed_url();
        env::set_var(SEED_URL_ENV, "http://from-env");
        let env_url = config.seed_url();

        match original {
            Some(val) => env::set_var(SEED_URL_ENV, val),
            None => env::remove_var(SEED_URL_ENV),
        }

        assert_eq!(default_url, BASE_URL);
        assert_eq!(file_url, "http://from-file");
        assert_eq!(env_url, "http://from-env");
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        let original = env::var(CONFIG_ENV).ok();
        env::set_var(CONFIG_ENV, "/tmp/todo-test/custom.toml");

        let path = get_config_path();

        match original {
            Some(val) => env::set_var(CONFIG_ENV, val),
            None => env::remove_var(CONFIG_ENV),
        }

        assert_eq!(path.unwrap(), PathBuf::from("/tmp/todo-test/custom.toml"));
    }
}
