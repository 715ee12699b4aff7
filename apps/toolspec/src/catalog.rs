//! Built-in demo tools registered by the CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use toolspec_core::{Annotate, Decorated, tool_spec};

/// Integer arithmetic left the `i64` range.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{a} {op} {b} overflows a 64-bit integer")]
pub struct Overflow {
    a: i64,
    op: char,
    b: i64,
}

/// Add two integers and return the result.
#[tool_spec(name = "add", description = "Add two integers")]
pub fn add(a: i64, b: i64) -> Result<i64, Overflow> {
    a.checked_add(b).ok_or(Overflow { a, op: '+', b })
}

/// Result of multiplying two numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Annotate)]
pub struct MultiplyResult {
    pub result: i64,
    pub explanation: String,
}

/// Multiply two integers and return the result with an explanation.
#[tool_spec(
    name = "multiply",
    description = "Multiply two integers with detailed explanation",
    output_model = MultiplyResult,
    version = "1.0.0"
)]
pub fn multiply(a: i64, b: i64) -> Result<MultiplyResult, Overflow> {
    let product = a.checked_mul(b).ok_or(Overflow { a, op: '*', b })?;
    Ok(MultiplyResult {
        result: product,
        explanation: format!("The product of {a} and {b} is {product}"),
    })
}

/// Materialize every built-in tool, registering it globally.
pub fn register_builtin() {
    for tool in [AddTool.spec(), MultiplyTool.spec()] {
        tracing::debug!(tool = %tool.name(), "built-in tool ready");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolspec_core::Kwargs;

    #[test]
    fn builtin_tools_are_registered() {
        register_builtin();
        let registry = toolspec_core::registry();
        assert!(registry.contains("add"));
        assert!(registry.contains("multiply"));
    }

    #[test]
    fn multiply_reports_its_model() {
        assert_eq!(multiply(4, 7).unwrap().result, 28);
        let spec = MultiplyTool.spec();
        assert_eq!(spec.version_or_na(), "1.0.0");
        assert_eq!(spec.output_schema().as_value()["title"], "MultiplyResult");

        let mut kwargs = Kwargs::new();
        kwargs.insert("a".into(), json!(4));
        kwargs.insert("b".into(), json!(7));
        assert_eq!(
            MultiplyTool.call_json(kwargs).unwrap(),
            json!({"result": 28, "explanation": "The product of 4 and 7 is 28"})
        );
    }

    #[test]
    fn overflow_is_reported_not_panicked() {
        assert_eq!(
            add(i64::MAX, 1).unwrap_err().to_string(),
            format!("{} + 1 overflows a 64-bit integer", i64::MAX)
        );

        let mut kwargs = Kwargs::new();
        kwargs.insert("a".into(), json!(i64::MAX));
        kwargs.insert("b".into(), json!(2));
        let err = MultiplyTool.call_json(kwargs).unwrap_err();
        assert!(matches!(err, toolspec_core::ToolError::Function(_)));
        assert_eq!(
            err.to_string(),
            format!("{} * 2 overflows a 64-bit integer", i64::MAX)
        );
    }
}
