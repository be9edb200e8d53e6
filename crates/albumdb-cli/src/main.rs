use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod prompt;

use commands::EntryValues;
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "albumdb", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the database (default: ~/.local/share/albumdb/albums.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Add albums interactively (the default when no command is given)
    ///
    /// Repeatedly asks "Add new entry? (y/n)". For each entry the artist,
    /// genre, year and classic flag are prompted for; values given as flags
    /// are used for the first entry instead of prompting.
    ///
    /// Each artist may be recorded only once. A second entry for an artist
    /// already in the database is skipped with a notice.
    ///
    /// When the session ends the full table of stored albums is printed.
    Add {
        /// Artist name
        #[arg(long)]
        artist: Option<String>,

        /// Genre
        #[arg(long)]
        genre: Option<String>,

        /// Release year
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i32>,

        /// Whether the album is a classic (true/false)
        #[arg(long)]
        classic: Option<bool>,
    },
    /// Print all stored albums in insertion order
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show database statistics
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file if it does not exist
    Init {
        /// Replace an existing file, keeping the old one as config.toml.bak
        #[arg(long)]
        force: bool,
    },
    /// Set a config value (database_path, logging.level, logging.output)
    Set { key: String, value: String },
}

impl Commands {
    /// The interactive session with nothing supplied up front.
    const fn session() -> Self {
        Self::Add {
            artist: None,
            genre: None,
            year: None,
            classic: None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or_else(Commands::session) {
        // Handled before loading the config so a broken file can be repaired
        Commands::Config { action } => run_config_action(action),
        command => run_with_config(command, cli.db),
    }
}

fn run_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => commands::config::show_config(),
        ConfigAction::Path => commands::config::show_path(),
        ConfigAction::Example => commands::config::show_example(),
        ConfigAction::Init { force } => commands::config::init_config(force),
        ConfigAction::Set { key, value } => commands::config::set_config(&key, &value),
    }
}

fn run_with_config(command: Commands, db: Option<PathBuf>) -> Result<()> {
    let config = match db {
        Some(path) => Config::load_with_db_path(path)?,
        None => Config::load()?,
    };

    twyg::setup(config.logging.to_opts()?)
        .map_err(|e| anyhow::anyhow!("Could not set up logging: {e:?}"))?;

    let database_path = config.database_path;

    // Ensure database directory exists
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    match command {
        Commands::Add {
            artist,
            genre,
            year,
            classic,
        } => {
            let preset = EntryValues {
                artist,
                genre,
                year,
                is_classic: classic,
            };
            commands::run_add(&database_path, preset)?;
        }
        Commands::List { json } => {
            commands::list_albums(&database_path, json)?;
        }
        Commands::Status => {
            commands::show_status(&database_path)?;
        }
        Commands::Config { action } => run_config_action(action)?,
    }

    Ok(())
}
