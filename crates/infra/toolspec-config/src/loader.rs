//! Configuration loader with two-layer merge and env overrides.
//!
//! The loading process:
//! 1. Read global config from `~/.config/toolspec/toolspec.json`
//! 2. Read local config from `./toolspec.json`
//! 3. Deep merge at JSON Value level (RFC 7396)
//! 4. Deserialize once into typed ToolkitConfig
//! 5. Apply env var overrides (highest precedence)
//! 6. Run advisory validation

use crate::{merge::merge_patch, types::ToolkitConfig, validation::AdvisoryWarning};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use toolspec_core::Framework;

/// Filename for local config.
pub const LOCAL_FILE: &str = "toolspec.json";

/// Directory name under config_dir for global config.
pub const GLOBAL_DIR: &str = "toolspec";

/// Filename for global config.
pub const GLOBAL_FILE: &str = "toolspec.json";

/// Resolved paths for config files.
#[derive(Debug, Clone)]
pub struct ToolkitConfigPaths {
    pub local: PathBuf,
    pub global: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct LoadedToolkitConfig {
    /// The loaded and merged configuration.
    pub config: ToolkitConfig,

    /// Advisory warnings from validation and env parsing.
    pub warnings: Vec<AdvisoryWarning>,

    /// Resolved config file paths.
    pub paths: ToolkitConfigPaths,
}

/// Get the global config file path.
pub fn global_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config dir")?;
    Ok(base.join(GLOBAL_DIR).join(GLOBAL_FILE))
}

/// Get the local config file path for a given directory.
pub fn local_config_path(local_dir: &Path) -> PathBuf {
    local_dir.join(LOCAL_FILE)
}

/// Load and merge configuration from global and local files.
pub fn load_merged(local_dir: &Path) -> Result<LoadedToolkitConfig> {
    let global_path = global_config_path()?;
    let local_path = local_config_path(local_dir);
    load_from_paths(&global_path, &local_path)
}

/// Load with explicit file locations. Missing files count as empty.
pub fn load_from_paths(global_path: &Path, local_path: &Path) -> Result<LoadedToolkitConfig> {
    let global_v = read_json_object_or_empty(global_path)?;
    let local_v = read_json_object_or_empty(local_path)?;

    let merged = merge_patch(global_v, local_v);

    let mut cfg: ToolkitConfig =
        serde_json::from_value(merged).context("Failed to deserialize merged toolspec config")?;

    let mut warnings = apply_env_overrides(&mut cfg);
    warnings.extend(crate::validation::validate(&cfg));

    tracing::debug!(
        global = %global_path.display(),
        local = %local_path.display(),
        warnings = warnings.len(),
        "loaded toolspec config"
    );

    Ok(LoadedToolkitConfig {
        config: cfg,
        warnings,
        paths: ToolkitConfigPaths {
            local: local_path.to_path_buf(),
            global: global_path.to_path_buf(),
        },
    })
}

/// Apply environment variable overrides to the config.
fn apply_env_overrides(cfg: &mut ToolkitConfig) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];

    if let Some(v) = env_trimmed("TOOLSPEC_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = env_trimmed("TOOLSPEC_LOG_JSON") {
        cfg.logging.json = v.eq_ignore_ascii_case("true") || v == "1";
    }
    if let Some(v) = env_trimmed("TOOLSPEC_DISABLED_FRAMEWORKS") {
        let mut disabled = vec![];
        for key in v.split(',').map(str::trim).filter(|k| !k.is_empty()) {
            match key.parse::<Framework>() {
                Ok(f) if !disabled.contains(&f) => disabled.push(f),
                Ok(_) => {}
                Err(e) => warnings.push(AdvisoryWarning {
                    code: "env.disabled_frameworks.unknown",
                    message: e,
                    path: "TOOLSPEC_DISABLED_FRAMEWORKS",
                }),
            }
        }
        cfg.frameworks.disabled = disabled;
    }

    warnings
}

/// Helper to read and normalize an env var (trim + filter empty).
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a JSON file as a Value, returning empty object if file doesn't exist.
fn read_json_object_or_empty(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Object(Default::default()));
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let v: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    match v {
        Value::Object(_) => Ok(v),
        _ => anyhow::bail!("Config root must be a JSON object: {}", path.display()),
    }
}
