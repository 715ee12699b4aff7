//! OpenAI adapter.
//!
//! Produces either a function-calling definition:
//! ```json
//! {
//!   "type": "function",
//!   "function": {
//!     "name": "...",
//!     "description": "...",
//!     "parameters": { ... }
//!   }
//! }
//! ```
//! or, when the agents runtime is available, a [`FunctionTool`] whose
//! `on_invoke_tool` shim runs the wrapped function.

use super::{Adapter, ensure_available};
use crate::capabilities::{Capabilities, Framework};
use crate::context::ToolContext;
use crate::error::ToolError;
use crate::function::{Kwargs, ToolFunction};
use crate::schema::InputSchema;
use crate::spec::ToolDefinition;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Async invocation entry point of an agents-runtime function tool.
pub type OnInvokeTool = Arc<dyn Fn(ToolContext, String) -> BoxFuture<'static, Value> + Send + Sync>;

/// Inner `function` object of a function-calling definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenAiFunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: InputSchema,
}

/// Function-calling tool definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenAiToolDef {
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    pub function: OpenAiFunctionDef,
}

/// Agents-runtime function tool.
#[derive(Clone)]
pub struct FunctionTool {
    pub name: String,
    pub description: String,
    pub params_json_schema: InputSchema,
    pub strict_json_schema: bool,
    pub on_invoke_tool: OnInvokeTool,
}

impl FunctionTool {
    /// Run the shim with a JSON-encoded argument string.
    pub fn invoke(&self, ctx: ToolContext, input: impl Into<String>) -> BoxFuture<'static, Value> {
        (self.on_invoke_tool)(ctx, input.into())
    }
}

impl fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("params_json_schema", &self.params_json_schema)
            .field("strict_json_schema", &self.strict_json_schema)
            .finish_non_exhaustive()
    }
}

/// Native OpenAI tool.
#[derive(Debug, Clone)]
pub enum OpenAiTool {
    Agents(FunctionTool),
    Function(OpenAiToolDef),
}

impl OpenAiTool {
    pub fn as_agents(&self) -> Option<&FunctionTool> {
        match self {
            OpenAiTool::Agents(tool) => Some(tool),
            OpenAiTool::Function(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&OpenAiToolDef> {
        match self {
            OpenAiTool::Function(def) => Some(def),
            OpenAiTool::Agents(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct OpenAiAdapter {
    definition: Arc<ToolDefinition>,
    agents: bool,
}

impl OpenAiAdapter {
    /// Function-calling definition; `parameters` is the input schema verbatim.
    pub fn to_standard_tool(&self) -> OpenAiToolDef {
        OpenAiToolDef {
            tool_type: "function",
            function: OpenAiFunctionDef {
                name: self.definition.name.clone(),
                description: self.definition.description.clone(),
                parameters: self.definition.input_schema.clone(),
            },
        }
    }

    /// Agents-runtime tool. Errors and panics of the wrapped function come
    /// back as `"Error executing tool: <message>"` text.
    pub fn to_agents_tool(&self) -> FunctionTool {
        let function = self.definition.function.clone();
        let name = self.definition.name.clone();
        let on_invoke_tool: OnInvokeTool = Arc::new(move |_ctx: ToolContext, input: String| {
            let function = function.clone();
            let name = name.clone();
            async move {
                match invoke_json(&function, &input) {
                    Ok(value) => value,
                    Err(message) => {
                        tracing::warn!(tool = %name, error = %message, "tool invocation failed");
                        Value::String(format!("Error executing tool: {message}"))
                    }
                }
            }
            .boxed()
        });

        FunctionTool {
            name: self.definition.name.clone(),
            description: self.definition.description.clone(),
            params_json_schema: self.definition.input_schema.clone(),
            strict_json_schema: true,
            on_invoke_tool,
        }
    }

    /// The wrapped function.
    pub fn to_callable(&self) -> ToolFunction {
        self.definition.function.clone()
    }
}

impl Adapter for OpenAiAdapter {
    const FRAMEWORK: Framework = Framework::OpenAi;
    type Tool = OpenAiTool;

    fn new(definition: Arc<ToolDefinition>, caps: Capabilities) -> Result<Self, ToolError> {
        ensure_available(Self::FRAMEWORK, caps)?;
        Ok(Self {
            definition,
            agents: caps.is_available(Framework::OpenAiAgents),
        })
    }

    fn definition(&self) -> &Arc<ToolDefinition> {
        &self.definition
    }

    fn to_tool(&self) -> OpenAiTool {
        if self.agents {
            OpenAiTool::Agents(self.to_agents_tool())
        } else {
            OpenAiTool::Function(self.to_standard_tool())
        }
    }
}

fn invoke_json(function: &ToolFunction, input: &str) -> Result<Value, String> {
    let kwargs = if input.is_empty() {
        Kwargs::new()
    } else {
        serde_json::from_str::<Kwargs>(input).map_err(|e| e.to_string())?
    };
    match catch_unwind(AssertUnwindSafe(|| function.call(kwargs))) {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}
