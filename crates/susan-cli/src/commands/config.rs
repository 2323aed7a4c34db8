//! Config command - inspect and edit the configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use susan_core::models::config::SusanConfig;
use susan_core::OrderTextParser;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a configuration file with the built-in tables
    Init {
        /// Output path for configuration file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a configuration value by dotted key
    Get {
        /// Configuration key (e.g. "extraction.default_delivery_days")
        key: String,
    },

    /// Set a configuration value by dotted key
    ///
    /// Map entries can be added directly, e.g.
    /// `susan config set extraction.unit_synonyms.관 kg`
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a bare string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

pub async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let path = default_config_path();

    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                println!("{} No config file found, showing defaults.", style("ℹ").blue());
            }
            println!("{}", serde_json::to_string_pretty(&load_or_default(&path)?)?);
        }
        ConfigCommand::Init { output, force } => {
            let output = output.unwrap_or(path);
            if output.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    output.display()
                );
            }
            save(&output, &SusanConfig::default())?;
            println!(
                "{} Created configuration file at {}",
                style("✓").green(),
                output.display()
            );
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(load_or_default(&path)?)?;
            let value = lookup(&json, &key)
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => {
            let value: Value =
                serde_json::from_str(&value).unwrap_or_else(|_| Value::String(value));

            let mut json = serde_json::to_value(load_or_default(&path)?)?;
            assign(&mut json, &key, value.clone())?;
            let config: SusanConfig = serde_json::from_value(json)?;

            // Reject tables the parser could not compile
            OrderTextParser::from_config(&config.extraction)?;

            save(&path, &config)?;
            println!("{} Set {} = {}", style("✓").green(), key, value);
        }
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'susan config init' to create a configuration file.");
            }
        }
    }

    Ok(())
}

/// Config file location; `SUSAN_CONFIG` overrides the platform default.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("SUSAN_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("susan")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<SusanConfig> {
    if path.exists() {
        Ok(SusanConfig::from_file(path)?)
    } else {
        Ok(SusanConfig::default())
    }
}

fn save(path: &Path, config: &SusanConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

fn assign(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let (parent_key, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };

    let mut parent = json;
    if let Some(parent_key) = parent_key {
        for part in parent_key.split('.') {
            parent = parent
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    match parent.as_object_mut() {
        Some(obj) => {
            obj.insert(leaf.to_string(), value);
            Ok(())
        }
        None => anyhow::bail!("Cannot set value at non-object path: {}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Value {
        serde_json::to_value(SusanConfig::default()).unwrap()
    }

    #[test]
    fn test_lookup_nested_key() {
        let json = defaults();
        assert_eq!(lookup(&json, "extraction.default_delivery_days"), Some(&Value::from(3)));
        assert_eq!(lookup(&json, "extraction.unit_synonyms.킬로"), Some(&Value::from("kg")));
        assert_eq!(lookup(&json, "extraction.missing"), None);
    }

    #[test]
    fn test_assign_adds_map_entry() {
        let mut json = defaults();
        assign(&mut json, "extraction.unit_synonyms.관", Value::from("kg")).unwrap();

        let config: SusanConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.extraction.unit_synonyms.get("관").map(String::as_str), Some("kg"));
    }

    #[test]
    fn test_assign_rejects_scalar_parent() {
        let mut json = defaults();
        assert!(assign(&mut json, "extraction.default_delivery_days.x", Value::from(1)).is_err());
        assert!(assign(&mut json, "nope.key", Value::from(1)).is_err());
    }
}
