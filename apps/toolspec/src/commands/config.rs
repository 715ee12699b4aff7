//! `toolspec config` subcommands.

use anyhow::{Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use clap::Subcommand;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use toolspec_config::{
    LoadedToolkitConfig, ToolkitConfig,
    loader::{global_config_path, local_config_path},
    load_merged,
};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default toolspec.json
    Init {
        /// Write the global file under the user config dir
        #[arg(long)]
        global: bool,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration after merging and env overrides
    Show {
        /// Compact single-line JSON
        #[arg(long)]
        json: bool,

        /// Directory holding the local toolspec.json (defaults to current dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Print the JSON Schema for toolspec.json
    Schema,

    /// Report advisory warnings for the effective configuration
    Validate {
        /// Directory holding the local toolspec.json (defaults to current dir)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub fn execute(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { global, force } => init(global, force),
        ConfigCommands::Show { json, path } => show(json, path),
        ConfigCommands::Schema => {
            println!("{}", toolspec_config::schema_json_pretty()?);
            Ok(())
        }
        ConfigCommands::Validate { path } => validate(path),
    }
}

fn init(global: bool, force: bool) -> Result<()> {
    let path = if global {
        let path = global_config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        path
    } else {
        local_config_path(&std::env::current_dir()?)
    };

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}\nUse --force to overwrite",
            path.display()
        );
    }

    let json = serde_json::to_string_pretty(&ToolkitConfig::default())?;
    AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(json.as_bytes()))
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    println!(
        "{} Created {}",
        "OK".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

fn load(path: Option<PathBuf>) -> Result<LoadedToolkitConfig> {
    let dir = match path {
        Some(p) => p,
        None => std::env::current_dir()?,
    };
    load_merged(&dir)
}

fn show(compact: bool, path: Option<PathBuf>) -> Result<()> {
    let loaded = load(path)?;
    for warning in &loaded.warnings {
        eprintln!("{} {}", "WARN".yellow(), warning);
    }

    let json = if compact {
        serde_json::to_string(&loaded.config)?
    } else {
        serde_json::to_string_pretty(&loaded.config)?
    };
    println!("{json}");
    Ok(())
}

fn validate(path: Option<PathBuf>) -> Result<()> {
    let loaded = load(path)?;

    if loaded.warnings.is_empty() {
        println!("{} Configuration is valid", "OK".green());
    } else {
        println!(
            "{} Configuration has {} warning(s):",
            "WARN".yellow(),
            loaded.warnings.len()
        );
        for w in &loaded.warnings {
            println!("  - {w}");
        }
    }

    println!("\nEnabled frameworks: {}", enabled_list(&loaded.config));
    print_paths(&loaded.paths.global, &loaded.paths.local);
    Ok(())
}

fn enabled_list(config: &ToolkitConfig) -> String {
    let enabled: Vec<&str> = config
        .capabilities()
        .frameworks()
        .into_iter()
        .map(|f| f.key())
        .collect();
    if enabled.is_empty() {
        "none".to_string()
    } else {
        enabled.join(", ")
    }
}

fn print_paths(global: &Path, local: &Path) {
    println!("\nConfig files:");
    println!("  Global: {}", global.display());
    println!("  Local:  {}", local.display());
}
