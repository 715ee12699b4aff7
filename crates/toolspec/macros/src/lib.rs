//! Proc macros for the toolspec library family.
//!
//! This crate provides:
//! - `#[tool_spec]` attribute macro for turning a plain function into a tool
//! - `#[derive(Annotate)]` for mapping user types into schema inference

mod annotate;
mod tool;

use proc_macro::TokenStream;

/// Attribute macro to define a tool specification from a synchronous function.
///
/// # Usage
///
/// ```ignore
/// use toolspec_core::{Decorated, tool_spec};
///
/// /// Multiply two numbers.
/// #[tool_spec(
///     name = "multiply",
///     description = "Multiply two numbers",
///     output_model = MultiplyResult,
///     version = "1.0.0"
/// )]
/// fn multiply(a: f64, b: f64, #[schema(default = 2)] precision: u32) -> MultiplyResult {
///     // implementation
/// }
/// ```
///
/// The function stays callable as written. A `MultiplyTool` unit struct is
/// generated alongside it with a typed `call`, a `decorator()` and
/// `tool_function()` pair, and an implementation of `Decorated` that wraps
/// and registers the tool on first use.
///
/// # Attributes
///
/// - `name`: The tool's unique name (defaults to function name)
/// - `description`: What the tool does (required)
/// - `output_model`: Structured model type whose schema becomes the output schema
/// - `version`: Version string
///
/// # Parameter attributes
///
/// - `#[schema(default = expr)]`: the parameter may be omitted; `expr` is used
/// - `#[schema(skip)]`: keep the parameter out of `properties`
///
/// `Option<T>` parameters default to `None`.
/// Parameter and return types without an `Annotate` impl fall back to the
/// generic schemas (`string` for parameters, `object` for returns).
#[proc_macro_attribute]
pub fn tool_spec(attr: TokenStream, item: TokenStream) -> TokenStream {
    tool::expand(attr.into(), item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive macro for the `Annotate` trait.
///
/// By default the type is annotated as a structured model, so its own JSON
/// Schema is used for return values. With `#[annotate(other)]` it is treated
/// as an unrecognized type and falls back to the generic schemas.
///
/// ```ignore
/// #[derive(Serialize, Deserialize, JsonSchema, Annotate)]
/// struct SearchResult {
///     title: String,
///     url: String,
/// }
/// ```
#[proc_macro_derive(Annotate, attributes(annotate))]
pub fn derive_annotate(input: TokenStream) -> TokenStream {
    annotate::expand(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
