//! Framework-neutral tool specifications for plain Rust functions.
//!
//! This crate provides:
//! - [`tool_spec`]: decorate a function once, as a builder or an attribute macro
//! - Schema inference from function signatures ([`Signature`], [`Annotate`])
//! - [`ToolSpec`] records held in a name-keyed [`Registry`]
//! - Adapters producing OpenAI, LangChain, CrewAI and Google ADK tools
//! - [`SchemaDocument`]: the export form of a record
//!
//! ```ignore
//! use toolspec_core::{Decorated, tool_spec};
//!
//! /// Add two integers.
//! #[tool_spec(name = "add", description = "Add two integers")]
//! fn add(a: i64, b: i64) -> i64 {
//!     a + b
//! }
//!
//! assert_eq!(add(2, 3), 5);
//! let openai = AddTool.as_openai_tool()?;
//! ```

extern crate self as toolspec_core;

pub mod adapters;
pub mod capabilities;
pub mod context;
pub mod decorate;
pub mod error;
pub mod export;
pub mod function;
pub mod registry;
pub mod schema;
pub mod spec;

pub use adapters::Adapter;
pub use capabilities::{Capabilities, Framework, capabilities, install};
pub use context::ToolContext;
pub use decorate::{Decorated, Decorator, WrappedTool, tool_spec};
pub use error::{BoxError, ToolError};
pub use export::SchemaDocument;
pub use function::{Arguments, Kwargs, ToolFunction, to_output};
pub use registry::{Registry, registry};
pub use schema::{
    Annotate, InputSchema, OutputModel, Param, Signature, StructuredModel, TypeAnnotation,
    infer_input_schema, infer_output_schema, infer_schemas,
};
pub use spec::{NO_VERSION, ToolDefinition, ToolSpec};

#[doc(hidden)]
pub use schema::dispatch as __dispatch;

pub use toolspec_macros::{Annotate, tool_spec};

// Re-export BoxFuture for agent-runtime tool signatures without exposing futures crate
pub use futures::future::BoxFuture;
