//! Args models derived from an input schema.
//!
//! LangChain and CrewAI both describe tool arguments with a typed model
//! rather than raw JSON Schema. [`ArgsModel`] is that model: one field per
//! property, with a host type, a required flag and an optional description.

use crate::error::ToolError;
use crate::function::Kwargs;
use crate::schema::InputSchema;
use serde::Serialize;
use serde_json::Value;

/// Host-side type of an args-model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostType {
    Text,
    Integer,
    Float,
    Boolean,
    Sequence,
    Mapping,
    DateTime,
    Date,
}

impl HostType {
    /// Host type of a property fragment. `formats` enables the string
    /// `date-time` and `date` refinements.
    pub fn from_fragment(fragment: &Value, formats: bool) -> Self {
        if fragment.get("enum").is_some() {
            return HostType::Text;
        }
        match fragment.get("type").and_then(Value::as_str) {
            Some("string") if formats => match fragment.get("format").and_then(Value::as_str) {
                Some("date-time") => HostType::DateTime,
                Some("date") => HostType::Date,
                _ => HostType::Text,
            },
            Some("integer") => HostType::Integer,
            Some("number") => HostType::Float,
            Some("boolean") => HostType::Boolean,
            Some("array") => HostType::Sequence,
            Some("object") => HostType::Mapping,
            _ => HostType::Text,
        }
    }

    /// Whether a JSON value has this type at the top level.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            HostType::Text | HostType::DateTime | HostType::Date => value.is_string(),
            HostType::Integer => value.is_i64() || value.is_u64(),
            HostType::Float => value.is_number(),
            HostType::Boolean => value.is_boolean(),
            HostType::Sequence => value.is_array(),
            HostType::Mapping => value.is_object(),
        }
    }
}

/// One field of an [`ArgsModel`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgField {
    pub name: String,
    pub host_type: HostType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Typed argument model named `<tool>Schema`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgsModel {
    pub name: String,
    pub fields: Vec<ArgField>,
}

impl ArgsModel {
    /// Derive from `schema.properties`. Returns `None` when there are no
    /// properties.
    pub fn from_input_schema(tool_name: &str, schema: &InputSchema, formats: bool) -> Option<Self> {
        if schema.properties.is_empty() {
            return None;
        }
        let fields = schema
            .properties
            .iter()
            .map(|(name, fragment)| ArgField {
                name: name.clone(),
                host_type: HostType::from_fragment(fragment, formats),
                required: schema.is_required(name),
                description: fragment
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect();
        Some(Self {
            name: format!("{tool_name}Schema"),
            fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&ArgField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate keyword arguments against the model.
    ///
    /// Required fields must be present and well typed; optional fields may be
    /// omitted or `null`, and a `null` is dropped so the parameter's default
    /// applies. Keys the model does not declare are dropped.
    pub fn validate(&self, mut kwargs: Kwargs) -> Result<Kwargs, ToolError> {
        let mut validated = Kwargs::new();
        for field in &self.fields {
            match kwargs.remove(&field.name) {
                None | Some(Value::Null) if !field.required => {}
                None => {
                    return Err(ToolError::invalid_input(format!(
                        "{}: field '{}' is required",
                        self.name, field.name
                    )));
                }
                Some(value) if field.host_type.accepts(&value) => {
                    validated.insert(field.name.clone(), value);
                }
                Some(value) => {
                    return Err(ToolError::invalid_input(format!(
                        "{}: field '{}' expected {:?}, got {}",
                        self.name,
                        field.name,
                        field.host_type,
                        kind(&value)
                    )));
                }
            }
        }
        Ok(validated)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> InputSchema {
        InputSchema::from_value(value).unwrap()
    }

    fn kwargs(value: Value) -> Kwargs {
        match value {
            Value::Object(map) => map,
            _ => Kwargs::new(),
        }
    }

    #[test]
    fn maps_property_types() {
        let input = schema(json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search text"},
                "limit": {"type": "integer"},
                "score": {"type": "number"},
                "exact": {"type": "boolean"},
                "tags": {"type": "array", "items": {"type": "string"}},
                "filters": {"type": "object"},
                "mode": {"type": "string", "enum": ["fast", "slow"]},
                "since": {"type": "string", "format": "date-time"},
                "on": {"type": "string", "format": "date"},
                "blob": {"type": "null"}
            },
            "required": ["query"]
        }));

        let model = ArgsModel::from_input_schema("search", &input, true).unwrap();
        assert_eq!(model.name, "searchSchema");
        let types: Vec<_> = model.fields.iter().map(|f| f.host_type).collect();
        assert_eq!(
            types,
            vec![
                HostType::Text,
                HostType::Integer,
                HostType::Float,
                HostType::Boolean,
                HostType::Sequence,
                HostType::Mapping,
                HostType::Text,
                HostType::DateTime,
                HostType::Date,
                HostType::Text,
            ]
        );
        let query = model.field("query").unwrap();
        assert!(query.required);
        assert_eq!(query.description.as_deref(), Some("Search text"));
        assert!(!model.field("limit").unwrap().required);
    }

    #[test]
    fn formats_are_ignored_when_disabled() {
        let input = schema(json!({
            "type": "object",
            "properties": {"since": {"type": "string", "format": "date-time"}}
        }));
        let model = ArgsModel::from_input_schema("t", &input, false).unwrap();
        assert_eq!(model.fields[0].host_type, HostType::Text);
    }

    #[test]
    fn no_properties_means_no_model() {
        assert!(ArgsModel::from_input_schema("t", &InputSchema::empty(), true).is_none());
    }

    #[test]
    fn validate_checks_presence_and_type() {
        let input = schema(json!({
            "type": "object",
            "properties": {"a": {"type": "integer"}, "b": {"type": "string"}},
            "required": ["a"]
        }));
        let model = ArgsModel::from_input_schema("t", &input, false).unwrap();

        let ok = model.validate(kwargs(json!({"a": 1, "extra": true}))).unwrap();
        assert_eq!(Value::Object(ok), json!({"a": 1}));

        let ok = model.validate(kwargs(json!({"a": 1, "b": null}))).unwrap();
        assert_eq!(Value::Object(ok), json!({"a": 1}));

        let err = model.validate(kwargs(json!({"b": "x"}))).unwrap_err();
        assert_eq!(err.to_string(), "invalid input: tSchema: field 'a' is required");

        let err = model.validate(kwargs(json!({"a": 1.5}))).unwrap_err();
        assert!(err.to_string().contains("expected Integer, got number"));
    }
}
