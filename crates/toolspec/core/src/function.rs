//! Type-erased tool functions.
//!
//! A [`ToolFunction`] pairs a callable taking keyword arguments with the
//! function's name, doc text and [`Signature`]. The `#[tool_spec]` macro
//! generates one per annotated function; hand-built tools use
//! [`ToolFunction::new`] directly.

use crate::error::ToolError;
use crate::schema::Signature;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Keyword arguments passed to a tool function.
pub type Kwargs = Map<String, Value>;

type Invoke = dyn Fn(Arguments) -> Result<Value, ToolError> + Send + Sync;

/// Callable with keyword arguments plus its introspection metadata.
#[derive(Clone)]
pub struct ToolFunction {
    name: Cow<'static, str>,
    doc: Option<String>,
    signature: Arc<Signature>,
    invoke: Arc<Invoke>,
}

impl ToolFunction {
    /// Wrap `f` as a tool function named `name` with the given signature.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, signature: Signature, f: F) -> Self
    where
        F: Fn(Arguments) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            doc: None,
            signature: Arc::new(signature),
            invoke: Arc::new(f),
        }
    }

    /// Attach doc text.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        let doc = doc.into();
        self.doc = (!doc.trim().is_empty()).then_some(doc);
        self
    }

    /// Function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Doc text, if any.
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Declared signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invoke with keyword arguments. Errors from the function pass through.
    pub fn call(&self, kwargs: Kwargs) -> Result<Value, ToolError> {
        (self.invoke)(Arguments::new(kwargs))
    }

    /// Whether both handles share the same underlying callable.
    pub fn ptr_eq(&self, other: &ToolFunction) -> bool {
        Arc::ptr_eq(&self.invoke, &other.invoke)
    }
}

impl fmt::Debug for ToolFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolFunction")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Keyword arguments being bound to a function's parameters.
#[derive(Debug, Default)]
pub struct Arguments {
    map: Kwargs,
}

impl Arguments {
    /// Wrap a keyword map.
    pub fn new(map: Kwargs) -> Self {
        Self { map }
    }

    /// Take a parameter that has no default.
    pub fn required<T: DeserializeOwned>(&mut self, name: &str) -> Result<T, ToolError> {
        let value = self.map.remove(name).ok_or_else(|| {
            ToolError::invalid_input(format!("missing required argument '{name}'"))
        })?;
        decode(name, value)
    }

    /// Take a parameter, using `default` when it is absent, or `null` for a
    /// type that cannot hold null.
    pub fn or_else<T: DeserializeOwned>(
        &mut self,
        name: &str,
        default: impl FnOnce() -> T,
    ) -> Result<T, ToolError> {
        match self.map.remove(name) {
            Some(Value::Null) => {
                Ok(serde_json::from_value(Value::Null).unwrap_or_else(|_| default()))
            }
            Some(value) => decode(name, value),
            None => Ok(default()),
        }
    }

    /// Take whatever remains, unbound.
    pub fn into_inner(self) -> Kwargs {
        self.map
    }

    /// Reject leftover arguments that match no parameter.
    pub fn finish(self) -> Result<(), ToolError> {
        match self.map.keys().next() {
            Some(extra) => Err(ToolError::invalid_input(format!(
                "unexpected argument '{extra}'"
            ))),
            None => Ok(()),
        }
    }
}

fn decode<T: DeserializeOwned>(name: &str, value: Value) -> Result<T, ToolError> {
    serde_json::from_value(value)
        .map_err(|e| ToolError::invalid_input(format!("argument '{name}': {e}")))
}

/// Serialize a function's return value.
pub fn to_output<T: Serialize>(value: T) -> Result<Value, ToolError> {
    Ok(serde_json::to_value(value)?)
}
