//! Advisory validation for [`ToolkitConfig`].
//!
//! Validation only produces warnings; a config with warnings is still used.

use crate::types::ToolkitConfig;
use toolspec_core::Framework;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// An advisory warning about a configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Human-readable warning message.
    pub message: String,

    /// JSON path to the problematic config field.
    pub path: &'static str,
}

impl std::fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

/// Validate a configuration and return advisory warnings.
pub fn validate(cfg: &ToolkitConfig) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];

    let level = cfg.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        warnings.push(AdvisoryWarning {
            code: "logging.level.invalid",
            message: format!(
                "unknown log level '{}', expected one of {}",
                cfg.logging.level,
                LOG_LEVELS.join(", ")
            ),
            path: "logging.level",
        });
    }

    let disabled = &cfg.frameworks.disabled;
    if Framework::ALL.iter().all(|f| disabled.contains(f)) {
        warnings.push(AdvisoryWarning {
            code: "frameworks.disabled.all",
            message: "every framework is disabled; no tool can be converted".into(),
            path: "frameworks.disabled",
        });
    } else if disabled.contains(&Framework::OpenAi) && !disabled.contains(&Framework::OpenAiAgents)
    {
        warnings.push(AdvisoryWarning {
            code: "frameworks.openai_agents.requires_openai",
            message: "openai-agents has no effect while openai is disabled".into(),
            path: "frameworks.disabled",
        });
    }

    warnings
}
