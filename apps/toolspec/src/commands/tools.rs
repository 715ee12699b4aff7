//! Tool inspection commands: list, export-schema and openai-tool.

use anyhow::{Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use colored::Colorize;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tabled::builder::Builder;
use tabled::settings::Style;
use toolspec_core::adapters::OpenAiAdapter;
use toolspec_core::{Registry, ToolSpec, WrappedTool};

pub fn list(registry: &Registry) -> Result<()> {
    print!("{}", render_table(&registry.list()));
    Ok(())
}

pub fn export_schema(registry: &Registry, name: &str, output: Option<&Path>) -> Result<()> {
    let spec = lookup(registry, name)?;
    let json = spec.export().to_pretty_json()?;

    match output {
        Some(path) => {
            AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
                .write(|f| f.write_all(json.as_bytes()))
                .with_context(|| format!("Failed to write schema to {}", path.display()))?;
            println!("Schema exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn openai_tool(registry: &Registry, name: &str) -> Result<()> {
    let spec = lookup(registry, name)?;
    let adapter = WrappedTool::from_spec(spec).adapter::<OpenAiAdapter>()?;
    println!(
        "{}",
        serde_json::to_string_pretty(&adapter.to_standard_tool())?
    );
    Ok(())
}

fn lookup(registry: &Registry, name: &str) -> Result<Arc<ToolSpec>> {
    registry
        .get(name)
        .with_context(|| format!("Tool '{name}' not found."))
}

/// Name/Description/Version table, or a notice when there is nothing to show.
fn render_table(specs: &[Arc<ToolSpec>]) -> String {
    if specs.is_empty() {
        return "No tools registered.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Name", "Description", "Version"]);
    for spec in specs {
        builder.push_record([spec.name(), spec.description(), spec.version_or_na()]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());

    format!("{}\n{table}\n", "Registered Tools".bold())
}
