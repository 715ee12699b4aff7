//! Decoration layer.
//!
//! [`tool_spec`] starts a [`Decorator`]; wrapping a [`ToolFunction`] infers
//! the schemas, builds the [`ToolSpec`], registers it and returns a
//! [`WrappedTool`]. The `#[tool_spec]` attribute macro drives the same path
//! for plain Rust functions.

use crate::adapters::{
    AdkAdapter, AdkFunctionTool, Adapter, CrewAiAdapter, CrewAiTool, LangChainAdapter, OpenAiAdapter,
    OpenAiTool, StructuredTool,
};
use crate::capabilities::{Capabilities, capabilities};
use crate::error::ToolError;
use crate::function::{Kwargs, ToolFunction};
use crate::registry::{Registry, registry};
use crate::schema::{OutputModel, StructuredModel, infer_schemas};
use crate::spec::{ToolDefinition, ToolSpec};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Start decorating a tool named `name`.
pub fn tool_spec(name: impl Into<String>, description: impl Into<String>) -> Decorator {
    Decorator {
        name: name.into(),
        description: description.into(),
        version: None,
        output_model: None,
        capabilities: None,
        registry: None,
    }
}

/// Options collected before a function is wrapped.
#[derive(Debug, Clone)]
#[must_use]
pub struct Decorator {
    name: String,
    description: String,
    version: Option<String>,
    output_model: Option<OutputModel>,
    capabilities: Option<Capabilities>,
    registry: Option<&'static Registry>,
}

impl Decorator {
    /// Use `M`'s schema as the output schema.
    pub fn output_model<M: StructuredModel + Serialize>(mut self) -> Self {
        self.output_model = Some(OutputModel::of::<M>());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Capabilities for adapter construction instead of the process-wide probe.
    pub fn capabilities(mut self, caps: Capabilities) -> Self {
        self.capabilities = Some(caps);
        self
    }

    /// Register into `registry` instead of the process-wide one.
    pub fn registry(mut self, registry: &'static Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the record without registering it.
    pub fn build(self, function: ToolFunction) -> Result<ToolSpec, ToolError> {
        self.into_parts(function).map(|(spec, _)| spec)
    }

    /// Wrap `function`, registering the record.
    pub fn wrap(self, function: ToolFunction) -> Result<WrappedTool, ToolError> {
        let target = self.registry.unwrap_or_else(registry);
        self.wrap_into(function, target)
    }

    /// Wrap `function`, registering the record into `target`.
    pub fn wrap_into(
        self,
        function: ToolFunction,
        target: &Registry,
    ) -> Result<WrappedTool, ToolError> {
        let (spec, caps) = self.into_parts(function)?;
        let spec = Arc::new(spec);
        target.register(Arc::clone(&spec));
        Ok(WrappedTool {
            spec,
            capabilities: caps,
        })
    }

    fn into_parts(
        self,
        function: ToolFunction,
    ) -> Result<(ToolSpec, Option<Capabilities>), ToolError> {
        let (input_schema, output_schema) =
            infer_schemas(function.signature(), self.output_model.as_ref());
        let definition = ToolDefinition {
            name: self.name,
            description: self.description,
            function,
            input_schema,
            output_schema,
            version: self.version,
            output_model: self.output_model,
        };
        Ok((ToolSpec::new(definition)?, self.capabilities))
    }
}

/// A wrapped function together with its registered record.
#[derive(Debug, Clone)]
pub struct WrappedTool {
    spec: Arc<ToolSpec>,
    capabilities: Option<Capabilities>,
}

impl WrappedTool {
    /// Wrap an existing record, using the process-wide capabilities.
    pub fn from_spec(spec: Arc<ToolSpec>) -> Self {
        Self {
            spec,
            capabilities: None,
        }
    }

    /// Call the function. Errors it returns propagate unchanged.
    pub fn call(&self, kwargs: Kwargs) -> Result<Value, ToolError> {
        self.spec.function().call(kwargs)
    }

    pub fn spec(&self) -> &Arc<ToolSpec> {
        &self.spec
    }

    /// Capabilities used for adapter construction.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities.unwrap_or_else(capabilities)
    }

    /// Cached adapter for `A`.
    pub fn adapter<A: Adapter>(&self) -> Result<Arc<A>, ToolError> {
        self.spec.adapter::<A>(self.capabilities())
    }

    /// Native tool of `A`'s framework.
    pub fn convert<A: Adapter>(&self) -> Result<A::Tool, ToolError> {
        Ok(self.adapter::<A>()?.to_tool())
    }
}

/// Conversions shared by [`WrappedTool`] and macro-generated tool types.
pub trait Decorated {
    /// The wrapped tool, materialized (and registered) on first access.
    fn wrapped(&self) -> &WrappedTool;

    fn spec(&self) -> &Arc<ToolSpec> {
        self.wrapped().spec()
    }

    /// Call with keyword arguments.
    fn call_json(&self, kwargs: Kwargs) -> Result<Value, ToolError> {
        self.wrapped().call(kwargs)
    }

    fn as_openai_tool(&self) -> Result<OpenAiTool, ToolError> {
        self.wrapped().convert::<OpenAiAdapter>()
    }

    fn as_adk_tool(&self) -> Result<AdkFunctionTool, ToolError> {
        self.wrapped().convert::<AdkAdapter>()
    }

    fn as_langchain_tool(&self) -> Result<StructuredTool, ToolError> {
        self.wrapped().convert::<LangChainAdapter>()
    }

    fn as_crewai_tool(&self) -> Result<CrewAiTool, ToolError> {
        self.wrapped().convert::<CrewAiAdapter>()
    }
}

impl Decorated for WrappedTool {
    fn wrapped(&self) -> &WrappedTool {
        self
    }
}
