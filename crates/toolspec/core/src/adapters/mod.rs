//! Framework adapters.
//!
//! Each adapter wraps a shared [`ToolDefinition`] and produces the native tool
//! object of one agent framework:
//! - OpenAI: function-calling definition, or an agents-runtime function tool
//! - LangChain: structured tool with a derived args model
//! - CrewAI: tool with a derived args model, forwarding keyword arguments
//! - Google ADK: function tool built from the function itself
//!
//! Adapters are constructed through [`ToolSpec::adapter`](crate::ToolSpec::adapter),
//! which caches one instance per record and framework.

pub mod adk;
pub mod args;
pub mod crewai;
pub mod langchain;
pub mod openai;

pub use adk::{AdkAdapter, AdkFunctionTool, FunctionDeclaration};
pub use args::{ArgField, ArgsModel, HostType};
pub use crewai::{CrewAiAdapter, CrewAiTool};
pub use langchain::{LangChainAdapter, StructuredTool};
pub use openai::{
    FunctionTool, OnInvokeTool, OpenAiAdapter, OpenAiFunctionDef, OpenAiTool, OpenAiToolDef,
};

use crate::capabilities::{Capabilities, Framework};
use crate::error::ToolError;
use crate::spec::ToolDefinition;
use std::sync::Arc;

/// Converts a specification into one framework's native tool.
pub trait Adapter: Sized + Send + Sync + 'static {
    /// Framework this adapter targets; also the cache key.
    const FRAMEWORK: Framework;

    /// Native tool type produced by [`to_tool`](Adapter::to_tool).
    type Tool;

    /// Build the adapter. Fails with [`ToolError::Unavailable`] when
    /// [`Self::FRAMEWORK`] is not in `caps`.
    fn new(definition: Arc<ToolDefinition>, caps: Capabilities) -> Result<Self, ToolError>;

    /// The wrapped definition.
    fn definition(&self) -> &Arc<ToolDefinition>;

    /// Produce a fresh native tool.
    fn to_tool(&self) -> Self::Tool;
}

pub(crate) fn ensure_available(framework: Framework, caps: Capabilities) -> Result<(), ToolError> {
    if caps.is_available(framework) {
        Ok(())
    } else {
        Err(ToolError::unavailable(framework))
    }
}
