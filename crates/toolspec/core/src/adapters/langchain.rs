//! LangChain adapter: structured tools with a derived args model.

use super::args::ArgsModel;
use super::{Adapter, ensure_available};
use crate::capabilities::{Capabilities, Framework};
use crate::error::ToolError;
use crate::function::{Kwargs, ToolFunction};
use crate::spec::ToolDefinition;
use serde_json::Value;
use std::sync::Arc;

/// LangChain structured tool.
#[derive(Debug, Clone)]
pub struct StructuredTool {
    pub name: String,
    pub description: String,
    pub func: ToolFunction,
    pub args_schema: Option<ArgsModel>,
}

impl StructuredTool {
    /// Invoke with a tool input: an object of keyword arguments, or `null`
    /// for none. Arguments are validated against the args model first.
    pub fn invoke(&self, input: Value) -> Result<Value, ToolError> {
        let kwargs = match input {
            Value::Object(map) => map,
            Value::Null => Kwargs::new(),
            other => {
                return Err(ToolError::invalid_input(format!(
                    "tool '{}' expects an object of arguments, got {other}",
                    self.name
                )));
            }
        };
        self.run(kwargs)
    }

    pub fn run(&self, kwargs: Kwargs) -> Result<Value, ToolError> {
        let kwargs = match &self.args_schema {
            Some(model) => model.validate(kwargs)?,
            None => kwargs,
        };
        self.func.call(kwargs)
    }
}

#[derive(Debug)]
pub struct LangChainAdapter {
    definition: Arc<ToolDefinition>,
}

impl LangChainAdapter {
    /// Args model for the input schema; `None` when it has no properties.
    pub fn args_model(&self) -> Option<ArgsModel> {
        ArgsModel::from_input_schema(&self.definition.name, &self.definition.input_schema, true)
    }
}

impl Adapter for LangChainAdapter {
    const FRAMEWORK: Framework = Framework::LangChain;
    type Tool = StructuredTool;

    fn new(definition: Arc<ToolDefinition>, caps: Capabilities) -> Result<Self, ToolError> {
        ensure_available(Self::FRAMEWORK, caps)?;
        Ok(Self { definition })
    }

    fn definition(&self) -> &Arc<ToolDefinition> {
        &self.definition
    }

    fn to_tool(&self) -> StructuredTool {
        StructuredTool {
            name: self.definition.name.clone(),
            description: self.definition.description.clone(),
            func: self.definition.function.clone(),
            args_schema: self.args_model(),
        }
    }
}
