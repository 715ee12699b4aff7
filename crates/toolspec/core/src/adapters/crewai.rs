//! CrewAI adapter.

use super::args::ArgsModel;
use super::{Adapter, ensure_available};
use crate::capabilities::{Capabilities, Framework};
use crate::error::ToolError;
use crate::function::{Kwargs, ToolFunction};
use crate::spec::ToolDefinition;
use serde_json::Value;
use std::sync::Arc;

/// CrewAI tool. `run` forwards keyword arguments to the function unmodified.
#[derive(Debug, Clone)]
pub struct CrewAiTool {
    pub name: String,
    pub description: String,
    pub args_schema: Option<ArgsModel>,
    pub function: ToolFunction,
}

impl CrewAiTool {
    pub fn run(&self, kwargs: Kwargs) -> Result<Value, ToolError> {
        self.function.call(kwargs)
    }
}

#[derive(Debug)]
pub struct CrewAiAdapter {
    definition: Arc<ToolDefinition>,
}

impl Adapter for CrewAiAdapter {
    const FRAMEWORK: Framework = Framework::CrewAi;
    type Tool = CrewAiTool;

    fn new(definition: Arc<ToolDefinition>, caps: Capabilities) -> Result<Self, ToolError> {
        ensure_available(Self::FRAMEWORK, caps)?;
        Ok(Self { definition })
    }

    fn definition(&self) -> &Arc<ToolDefinition> {
        &self.definition
    }

    fn to_tool(&self) -> CrewAiTool {
        let def = &self.definition;
        CrewAiTool {
            name: def.name.clone(),
            description: def.description.clone(),
            args_schema: ArgsModel::from_input_schema(&def.name, &def.input_schema, false),
            function: def.function.clone(),
        }
    }
}
