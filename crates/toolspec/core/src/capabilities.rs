//! Target frameworks and the cached availability probe.
//!
//! Each adapter is constructible only when its framework is available. The
//! probe is derived from this crate's cargo features, performed once, and
//! cached for the life of the process. Applications may [`install`] a
//! different set (for example from configuration) before first use.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Agent framework a specification can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    /// OpenAI function calling.
    #[serde(rename = "openai")]
    OpenAi,
    /// OpenAI Agents runtime (callable function tools).
    #[serde(rename = "openai-agents")]
    OpenAiAgents,
    /// LangChain structured tools.
    #[serde(rename = "langchain")]
    LangChain,
    /// CrewAI tools.
    #[serde(rename = "crewai")]
    CrewAi,
    /// Google Agent Development Kit function tools.
    Adk,
}

impl Framework {
    /// Every framework, in a stable order.
    pub const ALL: [Framework; 5] = [
        Framework::OpenAi,
        Framework::OpenAiAgents,
        Framework::LangChain,
        Framework::CrewAi,
        Framework::Adk,
    ];

    /// Stable key used for adapter caching and configuration.
    pub fn key(self) -> &'static str {
        match self {
            Framework::OpenAi => "openai",
            Framework::OpenAiAgents => "openai-agents",
            Framework::LangChain => "langchain",
            Framework::CrewAi => "crewai",
            Framework::Adk => "adk",
        }
    }

    /// Human-readable framework name.
    pub fn display_name(self) -> &'static str {
        match self {
            Framework::OpenAi => "OpenAI",
            Framework::OpenAiAgents => "OpenAI Agents",
            Framework::LangChain => "LangChain",
            Framework::CrewAi => "CrewAI",
            Framework::Adk => "Google ADK",
        }
    }

    /// How to enable the framework.
    pub fn install_hint(self) -> &'static str {
        match self {
            Framework::OpenAi => "enable the `openai` feature of toolspec-core",
            Framework::OpenAiAgents => "enable the `openai-agents` feature of toolspec-core",
            Framework::LangChain => "enable the `langchain` feature of toolspec-core",
            Framework::CrewAi => "enable the `crewai` feature of toolspec-core",
            Framework::Adk => "enable the `adk` feature of toolspec-core",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Framework::OpenAi => 1,
            Framework::OpenAiAgents => 1 << 1,
            Framework::LangChain => 1 << 2,
            Framework::CrewAi => 1 << 3,
            Framework::Adk => 1 << 4,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Framework::ALL
            .into_iter()
            .find(|f| f.key() == needle)
            .ok_or_else(|| format!("unknown framework: {s}"))
    }
}

/// Set of frameworks available to adapter construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    bits: u8,
}

impl Capabilities {
    /// No framework available.
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    /// Every framework available.
    pub fn all() -> Self {
        Framework::ALL
            .into_iter()
            .fold(Self::none(), |caps, f| caps.with(f))
    }

    /// Probe the frameworks compiled into this build.
    pub fn detect() -> Self {
        let mut caps = Self::none();
        if cfg!(feature = "openai") {
            caps = caps.with(Framework::OpenAi);
        }
        if cfg!(feature = "openai-agents") {
            caps = caps.with(Framework::OpenAiAgents);
        }
        if cfg!(feature = "langchain") {
            caps = caps.with(Framework::LangChain);
        }
        if cfg!(feature = "crewai") {
            caps = caps.with(Framework::CrewAi);
        }
        if cfg!(feature = "adk") {
            caps = caps.with(Framework::Adk);
        }
        caps
    }

    /// Return a copy with `framework` marked available.
    #[must_use]
    pub const fn with(self, framework: Framework) -> Self {
        Self {
            bits: self.bits | framework.bit(),
        }
    }

    /// Return a copy with `framework` marked unavailable.
    #[must_use]
    pub const fn without(self, framework: Framework) -> Self {
        Self {
            bits: self.bits & !framework.bit(),
        }
    }

    /// Whether `framework` is available.
    pub const fn is_available(self, framework: Framework) -> bool {
        self.bits & framework.bit() != 0
    }

    /// Available frameworks, in [`Framework::ALL`] order.
    pub fn frameworks(self) -> Vec<Framework> {
        Framework::ALL
            .into_iter()
            .filter(|f| self.is_available(*f))
            .collect()
    }
}

static PROBE: OnceLock<Capabilities> = OnceLock::new();

/// Process-wide capabilities, probed once on first access.
pub fn capabilities() -> Capabilities {
    *PROBE.get_or_init(|| {
        let caps = Capabilities::detect();
        tracing::debug!(frameworks = ?caps.frameworks(), "probed framework capabilities");
        caps
    })
}

/// Install process-wide capabilities before the first probe.
///
/// Returns the rejected set if the probe already ran.
pub fn install(caps: Capabilities) -> Result<(), Capabilities> {
    PROBE.set(caps)
}
