//! Google Agent Development Kit adapter.
//!
//! ADK function tools are built from the function alone: name, description
//! and parameter declaration all come from the function's own metadata. The
//! adapter therefore fills in a missing doc text from the record's description
//! before construction, then attaches the record's input schema.

use super::{Adapter, ensure_available};
use crate::capabilities::{Capabilities, Framework};
use crate::error::ToolError;
use crate::function::{Kwargs, ToolFunction};
use crate::schema::{InputSchema, infer_input_schema};
use crate::spec::ToolDefinition;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Declaration the ADK sends to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: InputSchema,
}

/// ADK function tool.
#[derive(Debug, Clone)]
pub struct AdkFunctionTool {
    pub name: String,
    pub description: Option<String>,
    pub func: ToolFunction,
    /// Input schema of the originating record, set by [`AdkAdapter`].
    pub schema: Option<InputSchema>,
    pub declaration: FunctionDeclaration,
}

impl AdkFunctionTool {
    /// Build from the function's name, doc text and signature.
    pub fn new(func: ToolFunction) -> Self {
        let name = func.name().to_string();
        let description = func.doc().map(str::to_string);
        let declaration = FunctionDeclaration {
            name: name.clone(),
            description: description.clone(),
            parameters: infer_input_schema(func.signature()),
        };
        Self {
            name,
            description,
            func,
            schema: None,
            declaration,
        }
    }

    pub fn run(&self, args: Kwargs) -> Result<Value, ToolError> {
        self.func.call(args)
    }
}

#[derive(Debug)]
pub struct AdkAdapter {
    definition: Arc<ToolDefinition>,
}

impl Adapter for AdkAdapter {
    const FRAMEWORK: Framework = Framework::Adk;
    type Tool = AdkFunctionTool;

    fn new(definition: Arc<ToolDefinition>, caps: Capabilities) -> Result<Self, ToolError> {
        ensure_available(Self::FRAMEWORK, caps)?;
        Ok(Self { definition })
    }

    fn definition(&self) -> &Arc<ToolDefinition> {
        &self.definition
    }

    fn to_tool(&self) -> AdkFunctionTool {
        let def = &self.definition;
        let func = match def.function.doc() {
            Some(_) => def.function.clone(),
            None => def.function.clone().with_doc(def.description.clone()),
        };
        let mut tool = AdkFunctionTool::new(func);
        tool.schema = Some(def.input_schema.clone());
        tool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::to_output;
    use crate::schema::{Param, Signature};
    use serde_json::json;

    fn greet(doc: Option<&str>) -> Arc<ToolDefinition> {
        let sig = Signature::new().param(Param::of::<String>("who"));
        let input = infer_input_schema(&sig);
        let mut function = ToolFunction::new("greet", sig, |mut args| {
            let who: String = args.required("who")?;
            to_output(format!("hello {who}"))
        });
        if let Some(doc) = doc {
            function = function.with_doc(doc);
        }
        Arc::new(ToolDefinition::new("greet_tool", "Greets someone", function).with_input_schema(input))
    }

    #[test]
    fn missing_doc_is_backfilled_from_description() {
        let def = greet(None);
        let tool = AdkAdapter::new(Arc::clone(&def), Capabilities::all())
            .unwrap()
            .to_tool();

        assert_eq!(tool.name, "greet");
        assert_eq!(tool.description.as_deref(), Some("Greets someone"));
        assert_eq!(tool.declaration.description.as_deref(), Some("Greets someone"));
        assert_eq!(tool.schema.as_ref(), Some(&def.input_schema));
        // The record's own function is left as it was.
        assert!(def.function.doc().is_none());
    }

    #[test]
    fn existing_doc_is_kept() {
        let tool = AdkAdapter::new(greet(Some("Say hi.")), Capabilities::all())
            .unwrap()
            .to_tool();
        assert_eq!(tool.description.as_deref(), Some("Say hi."));
    }

    #[test]
    fn bare_tool_has_no_schema_until_adapted() {
        let tool = AdkFunctionTool::new(greet(None).function.clone());
        assert!(tool.schema.is_none());
        assert!(tool.description.is_none());
        assert_eq!(
            serde_json::to_value(&tool.declaration).unwrap(),
            json!({
                "name": "greet",
                "parameters": {
                    "type": "object",
                    "properties": {"who": {"type": "string"}},
                    "required": ["who"]
                }
            })
        );
    }

    #[test]
    fn run_calls_the_function() {
        let tool = AdkAdapter::new(greet(None), Capabilities::all())
            .unwrap()
            .to_tool();
        let mut args = Kwargs::new();
        args.insert("who".into(), json!("ada"));
        assert_eq!(tool.run(args).unwrap(), json!("hello ada"));
    }
}
