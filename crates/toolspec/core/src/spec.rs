//! Specification records.
//!
//! A [`ToolSpec`] is the canonical metadata for one tool. Its immutable part,
//! [`ToolDefinition`], is shared with adapters through an `Arc`; the record
//! itself additionally owns the per-framework adapter cache.

use crate::adapters::Adapter;
use crate::capabilities::Capabilities;
use crate::error::ToolError;
use crate::export::SchemaDocument;
use crate::function::ToolFunction;
use crate::schema::{InputSchema, OutputModel};
use schemars::{Schema, json_schema};
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Presentation value for a missing version.
pub const NO_VERSION: &str = "N/A";

/// Immutable identity, schemas and function of a tool.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Description shown to consuming frameworks.
    pub description: String,
    /// The wrapped function.
    pub function: ToolFunction,
    /// Schema of the keyword arguments.
    pub input_schema: InputSchema,
    /// Schema of the return value.
    pub output_schema: Schema,
    /// Optional version string.
    pub version: Option<String>,
    /// Structured output model, when one was supplied.
    pub output_model: Option<OutputModel>,
}

impl ToolDefinition {
    /// Definition with an empty input schema and `{"type":"object"}` output.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        function: ToolFunction,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            function,
            input_schema: InputSchema::empty(),
            output_schema: json_schema!({"type": "object"}),
            version: None,
            output_model: None,
        }
    }

    #[must_use]
    pub fn with_input_schema(mut self, schema: InputSchema) -> Self {
        self.input_schema = schema;
        self
    }

    #[must_use]
    pub fn with_output_schema(mut self, schema: Schema) -> Self {
        self.output_schema = schema;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_output_model(mut self, model: OutputModel) -> Self {
        self.output_model = Some(model);
        self
    }
}

type AdapterSlot = Arc<dyn Any + Send + Sync>;

/// Specification record: definition plus a lazily filled adapter cache.
#[derive(Debug)]
pub struct ToolSpec {
    definition: Arc<ToolDefinition>,
    adapters: Mutex<HashMap<&'static str, AdapterSlot>>,
}

impl ToolSpec {
    /// Build a record, rejecting an empty name or description.
    pub fn new(definition: ToolDefinition) -> Result<Self, ToolError> {
        if definition.name.trim().is_empty() {
            return Err(ToolError::invalid_spec("tool name must not be empty"));
        }
        if definition.description.trim().is_empty() {
            return Err(ToolError::invalid_spec(format!(
                "tool '{}' must have a description",
                definition.name
            )));
        }
        Ok(Self {
            definition: Arc::new(definition),
            adapters: Mutex::new(HashMap::new()),
        })
    }

    pub fn definition(&self) -> &Arc<ToolDefinition> {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn description(&self) -> &str {
        &self.definition.description
    }

    pub fn function(&self) -> &ToolFunction {
        &self.definition.function
    }

    pub fn input_schema(&self) -> &InputSchema {
        &self.definition.input_schema
    }

    pub fn output_schema(&self) -> &Schema {
        &self.definition.output_schema
    }

    pub fn version(&self) -> Option<&str> {
        self.definition.version.as_deref()
    }

    /// Version for display; `"N/A"` when absent.
    pub fn version_or_na(&self) -> &str {
        self.version().unwrap_or(NO_VERSION)
    }

    pub fn output_model(&self) -> Option<&OutputModel> {
        self.definition.output_model.as_ref()
    }

    /// Export document for this record.
    pub fn export(&self) -> SchemaDocument {
        SchemaDocument::from_spec(self)
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<&'static str, AdapterSlot>> {
        self.adapters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached adapter for `A`'s framework, if one was constructed.
    pub fn get_adapter<A: Adapter>(&self) -> Option<Arc<A>> {
        let slot = self.cache().get(A::FRAMEWORK.key()).cloned()?;
        slot.downcast::<A>().ok()
    }

    /// Put `adapter` in the cache under `A`'s framework key.
    pub fn set_adapter<A: Adapter>(&self, adapter: Arc<A>) {
        self.cache().insert(A::FRAMEWORK.key(), adapter);
    }

    /// Cached adapter for `A`, constructing and caching it on first use.
    ///
    /// Construction runs under the cache lock, so at most one adapter exists
    /// per (record, framework) pair. A failed construction caches nothing.
    pub fn adapter<A: Adapter>(&self, caps: Capabilities) -> Result<Arc<A>, ToolError> {
        let key = A::FRAMEWORK.key();
        let mut cache = self.cache();
        if let Some(existing) = cache.get(key).cloned()
            && let Ok(adapter) = existing.downcast::<A>()
        {
            tracing::trace!(tool = %self.name(), framework = key, "adapter cache hit");
            return Ok(adapter);
        }

        let adapter = Arc::new(A::new(Arc::clone(&self.definition), caps)?);
        tracing::debug!(tool = %self.name(), framework = key, "constructed adapter");
        cache.insert(key, Arc::clone(&adapter) as AdapterSlot);
        Ok(adapter)
    }

    /// Framework keys with a cached adapter, sorted.
    pub fn cached_frameworks(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.cache().keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}
