use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use toml_edit::{value, DocumentMut};

/// Log levels accepted in the `[logging]` section.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuration for albumdb.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (ALBUMDB_* prefix)
/// 3. Config file (~/.config/albumdb/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Path to the SQLite database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: ALBUMDB_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/albumdb/albums.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Keeps prompts and tables on stdout free of log lines.
    #[default]
    Stderr,
    Stdout,
}

/// The `[logging]` section, turned into twyg options at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub coloured: bool,
    pub output: LogOutput,
    pub report_caller: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("warn"),
            coloured: true,
            output: LogOutput::Stderr,
            report_caller: false,
        }
    }
}

impl LoggingConfig {
    /// Build the twyg logger options.
    pub fn to_opts(&self) -> Result<twyg::Opts> {
        let level = parse_level(&self.level).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid log level: {}\n\nValid levels: {}",
                self.level,
                LOG_LEVELS.join(", ")
            )
        })?;
        let output = match self.output {
            LogOutput::Stderr => twyg::Output::Stderr,
            LogOutput::Stdout => twyg::Output::Stdout,
        };

        twyg::OptsBuilder::new()
            .coloured(self.coloured)
            .level(level)
            .output(output)
            .report_caller(self.report_caller)
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid logging options: {e:?}"))
    }
}

fn parse_level(level: &str) -> Option<twyg::LogLevel> {
    match level.to_lowercase().as_str() {
        "trace" => Some(twyg::LogLevel::Trace),
        "debug" => Some(twyg::LogLevel::Debug),
        "info" => Some(twyg::LogLevel::Info),
        "warn" => Some(twyg::LogLevel::Warn),
        "error" => Some(twyg::LogLevel::Error),
        _ => None,
    }
}

impl Config {
    /// Load configuration from the default config file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `config_path` (if it exists) and environment variables.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("albumdb");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, overriding the database path from `--db`.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }
}

/// Returns: ~/.local/share/albumdb/albums.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("albumdb")
        .join("albums.db")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/albumdb/config.toml
/// - macOS: ~/Library/Application Support/albumdb/config.toml
/// - Windows: %APPDATA%\albumdb\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("albumdb")
        .join("config.toml")
}

/// Example config file, with the database path set to the platform default.
pub fn example_config() -> String {
    let mut db_line = DocumentMut::new();
    db_line["database_path"] = value(default_db_path().display().to_string());

    format!(
        r#"# albumdb Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (ALBUMDB_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite database holding the albums table
#
# Can also be set via:
# - CLI: albumdb --db /custom/albums.db list
# - Environment: ALBUMDB_DATABASE_PATH=/custom/albums.db
{db_line}
# Logging
#
# level: trace, debug, info, warn or error
# output: stderr or stdout
#[logging]
#level = "debug"
#output = "stderr"
#coloured = true
"#
    )
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    write_config_file(&config_file_path(), false)
}

/// Write the example config to `config_path`.
///
/// An existing file is left alone unless `force` is set, in which case it is
/// moved aside to `config.toml.bak` first. Returns true if a file was written.
pub fn write_config_file(config_path: &Path, force: bool) -> Result<bool> {
    if config_path.exists() {
        if !force {
            return Ok(false);
        }
        let backup = config_path.with_extension("toml.bak");
        std::fs::rename(config_path, &backup).context("Failed to back up config file")?;
        log::info!("Moved old config to {}", backup.display());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
