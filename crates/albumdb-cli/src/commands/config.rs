//! `albumdb config ...` actions.
//!
//! None of these require the config file to load, so they stay usable for
//! repairing a broken file.

use anyhow::{Context, Result};
use toml_edit::{value, DocumentMut};

use crate::config::{self, Config, LOG_LEVELS};

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config_path = config::config_file_path();

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());
    println!(
        "File exists: {}\n",
        if config_path.exists() {
            "yes"
        } else {
            "no (using defaults)"
        }
    );

    match Config::load_from(&config_path) {
        Ok(config) => {
            println!("Settings:");
            println!("  database_path: {}", config.database_path.display());
            println!("  logging.level: {}", config.logging.level);
            println!("  logging.output: {:?}", config.logging.output);
            println!("  logging.coloured: {}", config.logging.coloured);
        }
        Err(e) => {
            println!("Settings could not be loaded: {e:#}");
            println!("\nRun 'albumdb config init --force' to replace the file.");
        }
    }

    println!("\nPriority: CLI args > ENV vars (ALBUMDB_*) > Config file > Defaults");

    Ok(())
}

/// Set a config value, keeping the rest of the file (comments included) intact.
pub fn set_config(key: &str, new_value: &str) -> Result<()> {
    let config_path = config::config_file_path();
    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let updated = apply_setting(&contents, key, new_value).with_context(|| {
        format!(
            "Could not update {}\n\nRun 'albumdb config init --force' to replace a broken file.",
            config_path.display()
        )
    })?;

    std::fs::write(&config_path, updated).context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, new_value);
    println!("  in {}", config_path.display());

    Ok(())
}

fn apply_setting(contents: &str, key: &str, new_value: &str) -> Result<String> {
    let mut doc = contents
        .parse::<DocumentMut>()
        .context("Failed to parse config file")?;

    match key {
        "database_path" => {
            doc["database_path"] = value(new_value);
        }
        "logging.level" => {
            let level = new_value.to_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                anyhow::bail!(
                    "Invalid log level: {}\n\nValid levels: {}",
                    new_value,
                    LOG_LEVELS.join(", ")
                );
            }
            doc["logging"]["level"] = value(level);
        }
        "logging.output" => {
            let output = new_value.to_lowercase();
            if output != "stderr" && output != "stdout" {
                anyhow::bail!(
                    "Invalid log output: {}\n\nValid outputs: stderr, stdout",
                    new_value
                );
            }
            doc["logging"]["output"] = value(output);
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\nValid keys: database_path, logging.level, logging.output",
                key
            );
        }
    }

    Ok(doc.to_string())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults. `force` replaces an existing file.
pub fn init_config(force: bool) -> Result<()> {
    let config_path = config::config_file_path();
    let existed = config_path.exists();
    let written = config::write_config_file(&config_path, force)?;

    if !written {
        println!("Config file already exists: {}", config_path.display());
        println!("\nUse --force to replace it.");
    } else if existed {
        println!("✓ Replaced config file: {}", config_path.display());
        println!("  previous version saved as config.toml.bak");
    } else {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure albumdb.");
    }

    Ok(())
}
