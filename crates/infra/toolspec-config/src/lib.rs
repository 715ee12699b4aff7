//! Layered configuration for the toolspec toolkit.
//!
//! This crate provides:
//! - [`ToolkitConfig`]: framework availability and logging settings
//! - [`load_merged`]: Two-layer config loading (global + local) with env overrides
//! - [`schema`]: JSON Schema generation for IDE autocomplete
//! - [`validation`]: Advisory validation that produces warnings
//!
//! # Configuration Precedence (lowest to highest)
//! 1. Default values
//! 2. Global config (`~/.config/toolspec/toolspec.json`)
//! 3. Local config (`./toolspec.json`)
//! 4. Environment variables
//!
//! # Example
//! ```no_run
//! use toolspec_config::load_merged;
//! use std::path::Path;
//!
//! let loaded = load_merged(Path::new(".")).unwrap();
//! let _ = toolspec_core::install(loaded.config.capabilities());
//!
//! for warning in &loaded.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! ```
//!
//! # Environment Variables
//! - `TOOLSPEC_LOG_LEVEL`: Override log level
//! - `TOOLSPEC_LOG_JSON`: Enable JSON logging ("true" or "1")
//! - `TOOLSPEC_DISABLED_FRAMEWORKS`: Comma-separated framework keys to disable

pub mod loader;
pub mod merge;
pub mod schema;
pub mod types;
pub mod validation;

pub use loader::{LoadedToolkitConfig, load_merged};
pub use schema::schema_json_pretty;
pub use types::{FrameworksConfig, LoggingConfig, ToolkitConfig};
