//! Toolspec CLI.
//!
//! The `toolspec` command lists registered tool specifications, exports their
//! schema documents and manages `toolspec.json` configuration.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toolspec_config::LoggingConfig;

mod catalog;
mod commands;

#[derive(Parser)]
#[command(name = "toolspec")]
#[command(about = "Inspect and export framework-neutral tool specifications")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List all registered tools
    List,

    /// Export the schema document of a tool
    ExportSchema {
        /// Name of the tool to export
        name: String,

        /// Output file path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the OpenAI function-calling definition of a tool
    OpenaiTool {
        /// Name of the tool
        name: String,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|dir| toolspec_config::load_merged(&dir));
    let logging = loaded
        .as_ref()
        .map(|l| l.config.logging.clone())
        .unwrap_or_default();
    init_tracing(cli.verbose, &logging);

    match &loaded {
        Ok(l) => {
            if toolspec_core::install(l.config.capabilities()).is_err() {
                tracing::debug!("framework capabilities were already probed");
            }
        }
        Err(e) => tracing::warn!("ignoring toolspec configuration: {e:#}"),
    }

    catalog::register_builtin();
    let registry = toolspec_core::registry();

    match cli.command {
        Commands::List => commands::tools::list(registry),
        Commands::ExportSchema { name, output } => {
            commands::tools::export_schema(registry, &name, output.as_deref())
        }
        Commands::OpenaiTool { name } => commands::tools::openai_tool(registry, &name),
        Commands::Config { command } => commands::config::execute(command),
    }
}

/// Verbosity flags win over configuration; `RUST_LOG` wins over both.
fn init_tracing(verbose: u8, logging: &LoggingConfig) {
    let level = match verbose {
        0 => logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
