//! Serializable export form of a specification record.

use crate::error::ToolError;
use crate::schema::InputSchema;
use crate::spec::ToolSpec;
use schemars::Schema;
use serde::{Deserialize, Serialize};

/// Schema document written by `toolspec export-schema`.
///
/// Keys are emitted in the order `name`, `description`, `version`,
/// `input_schema`, `output_schema`; a missing version is written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub name: String,
    pub description: String,
    pub version: Option<String>,
    pub input_schema: InputSchema,
    pub output_schema: Schema,
}

impl SchemaDocument {
    pub fn from_spec(spec: &ToolSpec) -> Self {
        Self {
            name: spec.name().to_string(),
            description: spec.description().to_string(),
            version: spec.version().map(str::to_string),
            input_schema: spec.input_schema().clone(),
            output_schema: spec.output_schema().clone(),
        }
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, ToolError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, ToolError> {
        serde_json::from_str(s).map_err(ToolError::invalid_input)
    }
}
