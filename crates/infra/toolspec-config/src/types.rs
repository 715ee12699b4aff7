//! Configuration types.
//!
//! The root type is [`ToolkitConfig`]. Every field is defaulted, so partial
//! files deserialize cleanly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use toolspec_core::{Capabilities, Framework};

/// Root configuration, loaded from `toolspec.json` files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Optional JSON Schema URL for IDE autocomplete support.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Which agent frameworks adapters may target.
    pub frameworks: FrameworksConfig,

    /// Logging and diagnostics configuration.
    pub logging: LoggingConfig,
}

impl ToolkitConfig {
    /// Compiled-in capabilities minus the disabled frameworks.
    pub fn capabilities(&self) -> Capabilities {
        self.frameworks.apply(Capabilities::detect())
    }
}

/// Framework availability overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FrameworksConfig {
    /// Frameworks treated as unavailable even when compiled in.
    pub disabled: Vec<Framework>,
}

impl FrameworksConfig {
    /// Remove every disabled framework from `caps`.
    pub fn apply(&self, caps: Capabilities) -> Capabilities {
        self.disabled.iter().fold(caps, |caps, f| caps.without(*f))
    }
}

/// Logging and diagnostics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Whether to enable JSON-formatted logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_deserializes() {
        let cfg: ToolkitConfig =
            serde_json::from_str(r#"{"frameworks": {"disabled": ["crewai", "adk"]}}"#).unwrap();
        assert_eq!(
            cfg.frameworks.disabled,
            vec![Framework::CrewAi, Framework::Adk]
        );
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[test]
    fn test_disabled_frameworks_are_removed() {
        let frameworks = FrameworksConfig {
            disabled: vec![Framework::LangChain],
        };
        let caps = frameworks.apply(Capabilities::all());
        assert!(!caps.is_available(Framework::LangChain));
        assert!(caps.is_available(Framework::OpenAi));
    }

    #[test]
    fn test_default_config_keeps_detected_capabilities() {
        assert_eq!(
            ToolkitConfig::default().capabilities(),
            Capabilities::detect()
        );
    }

    #[test]
    fn test_unknown_framework_is_rejected() {
        let res: Result<ToolkitConfig, _> =
            serde_json::from_str(r#"{"frameworks": {"disabled": ["autogen"]}}"#);
        assert!(res.is_err());
    }
}
