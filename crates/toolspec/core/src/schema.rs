//! Schema inference from function signatures.
//!
//! A [`Signature`] lists a function's parameters (name, optional
//! [`TypeAnnotation`], whether a default exists) and its return annotation.
//! The engine maps each annotation through a fixed precedence table and never
//! fails: unrecognized parameter annotations become `{"type":"string"}` and
//! unrecognized return annotations become `{"type":"object"}`. Nested types
//! are not decomposed.

use crate::error::ToolError;
use schemars::{JsonSchema, Schema, json_schema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

/// Type annotation of a parameter or return value, as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// `bool`.
    Boolean,
    /// Any integer primitive.
    Integer,
    /// `f32` / `f64`.
    Float,
    /// Text (`String`, `str`, `char`, ...).
    Text,
    /// Homogeneous sequence; `None` when the element type is unknown.
    Sequence(Option<Box<TypeAnnotation>>),
    /// Structured model carrying its own canonical schema.
    Model {
        /// Model type name.
        name: Cow<'static, str>,
        /// Canonical schema emitted by the model.
        schema: Schema,
    },
    /// Unconstrained JSON value.
    Any,
    /// Anything else, by type name.
    Other(Cow<'static, str>),
}

impl TypeAnnotation {
    /// Annotation for a structured model type.
    pub fn model<M: StructuredModel>() -> Self {
        TypeAnnotation::Model {
            name: M::model_name(),
            schema: M::model_schema(),
        }
    }

    /// Annotation for an unrecognized type.
    pub fn other(name: impl Into<Cow<'static, str>>) -> Self {
        TypeAnnotation::Other(name.into())
    }

    /// Sequence of `inner`.
    pub fn sequence_of(inner: TypeAnnotation) -> Self {
        TypeAnnotation::Sequence(Some(Box::new(inner)))
    }
}

/// Maps a Rust type to its [`TypeAnnotation`].
///
/// Implemented for primitives, text, sequences and the common wrappers.
/// Implement it for your own types with `#[derive(Annotate)]`.
pub trait Annotate {
    /// The annotation for `Self`.
    fn annotation() -> TypeAnnotation;
}

macro_rules! annotate_as {
    ($variant:expr => $($ty:ty),+ $(,)?) => {
        $(impl Annotate for $ty {
            fn annotation() -> TypeAnnotation {
                $variant
            }
        })+
    };
}

annotate_as!(TypeAnnotation::Boolean => bool);
annotate_as!(TypeAnnotation::Integer =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
annotate_as!(TypeAnnotation::Float => f32, f64);
annotate_as!(TypeAnnotation::Text => String, str, char, PathBuf);
annotate_as!(TypeAnnotation::Any => Value);
annotate_as!(TypeAnnotation::other("()") => ());
annotate_as!(TypeAnnotation::other("Map") => Map<String, Value>);

impl Annotate for Cow<'_, str> {
    fn annotation() -> TypeAnnotation {
        TypeAnnotation::Text
    }
}

impl<T: Annotate> Annotate for Vec<T> {
    fn annotation() -> TypeAnnotation {
        TypeAnnotation::sequence_of(T::annotation())
    }
}

impl<T: Annotate> Annotate for VecDeque<T> {
    fn annotation() -> TypeAnnotation {
        TypeAnnotation::sequence_of(T::annotation())
    }
}

impl<T: Annotate> Annotate for [T] {
    fn annotation() -> TypeAnnotation {
        TypeAnnotation::sequence_of(T::annotation())
    }
}

impl<K, V> Annotate for HashMap<K, V> {
    fn annotation() -> TypeAnnotation {
        TypeAnnotation::other("HashMap")
    }
}

impl<K, V> Annotate for BTreeMap<K, V> {
    fn annotation() -> TypeAnnotation {
        TypeAnnotation::other("BTreeMap")
    }
}

impl<T: Annotate> Annotate for Option<T> {
    fn annotation() -> TypeAnnotation {
        T::annotation()
    }
}

impl<T: Annotate + ?Sized> Annotate for &T {
    fn annotation() -> TypeAnnotation {
        T::annotation()
    }
}

impl<T: Annotate + ?Sized> Annotate for Box<T> {
    fn annotation() -> TypeAnnotation {
        T::annotation()
    }
}

impl<T: Annotate + ?Sized> Annotate for Arc<T> {
    fn annotation() -> TypeAnnotation {
        T::annotation()
    }
}

impl<T: Annotate + ?Sized> Annotate for Rc<T> {
    fn annotation() -> TypeAnnotation {
        T::annotation()
    }
}

/// Annotation lookup used by `#[tool_spec]` expansions.
///
/// `(&AnnotationOf::<T>::new("T")).annotation()` resolves to
/// [`Annotate::annotation`] when `T: Annotate` and to
/// [`TypeAnnotation::Other`] otherwise, so parameters of foreign types
/// degrade to the string fallback instead of failing to compile.
#[doc(hidden)]
pub mod dispatch {
    use super::{Annotate, TypeAnnotation};
    use std::marker::PhantomData;

    pub struct AnnotationOf<T: ?Sized> {
        name: &'static str,
        marker: PhantomData<T>,
    }

    impl<T: ?Sized> AnnotationOf<T> {
        pub const fn new(name: &'static str) -> Self {
            Self {
                name,
                marker: PhantomData,
            }
        }
    }

    pub trait ViaAnnotate {
        fn annotation(&self) -> TypeAnnotation;
    }

    impl<T: Annotate + ?Sized> ViaAnnotate for AnnotationOf<T> {
        fn annotation(&self) -> TypeAnnotation {
            T::annotation()
        }
    }

    pub trait ViaFallback {
        fn annotation(&self) -> TypeAnnotation;
    }

    impl<T: ?Sized> ViaFallback for &AnnotationOf<T> {
        fn annotation(&self) -> TypeAnnotation {
            TypeAnnotation::other(self.name)
        }
    }
}

/// A type that emits its own canonical schema and can be built from keyword data.
pub trait StructuredModel: Sized {
    /// Model name used in annotations and listings.
    fn model_name() -> Cow<'static, str>;

    /// Canonical JSON Schema of the model.
    fn model_schema() -> Schema;

    /// Validate and construct an instance from keyword data.
    fn from_keywords(data: Map<String, Value>) -> Result<Self, ToolError>;
}

impl<T> StructuredModel for T
where
    T: JsonSchema + DeserializeOwned + Serialize,
{
    fn model_name() -> Cow<'static, str> {
        T::schema_name()
    }

    fn model_schema() -> Schema {
        schemars::generate::SchemaSettings::default()
            .into_generator()
            .into_root_schema_for::<T>()
    }

    fn from_keywords(data: Map<String, Value>) -> Result<Self, ToolError> {
        serde_json::from_value(Value::Object(data)).map_err(ToolError::invalid_input)
    }
}

/// Structured output model attached to a specification.
#[derive(Debug, Clone)]
pub struct OutputModel {
    name: Cow<'static, str>,
    schema: Schema,
    construct: fn(Map<String, Value>) -> Result<Value, ToolError>,
}

impl OutputModel {
    /// Capture `M` as an output model.
    pub fn of<M: StructuredModel + Serialize>() -> Self {
        Self {
            name: M::model_name(),
            schema: M::model_schema(),
            construct: construct_model::<M>,
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical model schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate keyword data against the model, returning the normalized instance.
    pub fn construct(&self, data: Map<String, Value>) -> Result<Value, ToolError> {
        (self.construct)(data)
    }
}

fn construct_model<M: StructuredModel + Serialize>(
    data: Map<String, Value>,
) -> Result<Value, ToolError> {
    let instance = M::from_keywords(data)?;
    Ok(serde_json::to_value(instance)?)
}

/// One parameter of a [`Signature`].
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Annotation; `None` keeps the parameter out of `properties`.
    pub annotation: Option<TypeAnnotation>,
    /// Whether the parameter has a default value.
    pub has_default: bool,
}

impl Param {
    /// Parameter annotated with `T`.
    pub fn of<T: Annotate + ?Sized>(name: impl Into<String>) -> Self {
        Self::annotated(name, T::annotation())
    }

    /// Parameter with an explicit annotation.
    pub fn annotated(name: impl Into<String>, annotation: TypeAnnotation) -> Self {
        Self {
            name: name.into(),
            annotation: Some(annotation),
            has_default: false,
        }
    }

    /// Parameter without annotation.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            has_default: false,
        }
    }

    /// Mark the parameter as having a default value.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// Parameter list and return annotation of a function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    /// Return annotation; `None` when unannotated.
    pub returns: Option<TypeAnnotation>,
}

impl Signature {
    /// Empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Set the return annotation to `T`.
    #[must_use]
    pub fn returns<T: Annotate + ?Sized>(mut self) -> Self {
        self.returns = Some(T::annotation());
        self
    }

    /// Set the return annotation explicitly.
    #[must_use]
    pub fn returns_annotation(mut self, annotation: Option<TypeAnnotation>) -> Self {
        self.returns = annotation;
        self
    }
}

fn object_type() -> String {
    "object".to_string()
}

/// JSON Schema of a tool's keyword arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    /// Always `"object"` for inferred schemas.
    #[serde(rename = "type", default = "object_type")]
    pub schema_type: String,
    /// Parameter name to schema fragment, in declaration order.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Parameters without a default, in declaration order.
    #[serde(default)]
    pub required: Vec<String>,
    /// Any other keys of a hand-written schema, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for InputSchema {
    fn default() -> Self {
        Self {
            schema_type: object_type(),
            properties: Map::new(),
            required: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl InputSchema {
    /// Schema with no parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a hand-written schema; missing `properties`/`required` read as empty.
    pub fn from_value(value: Value) -> Result<Self, ToolError> {
        serde_json::from_value(value).map_err(ToolError::invalid_spec)
    }

    /// Whether `name` is required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Schema fragment for `name`.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Render as a JSON value.
    pub fn to_value(&self) -> Value {
        // Only strings and JSON values inside; serialization cannot fail.
        serde_json::to_value(self).unwrap_or_else(|_| json!({"type": "object"}))
    }
}

/// Fragments shared by input and output inference (precedence rules 1-7).
fn primitive_fragment(annotation: &TypeAnnotation) -> Option<Value> {
    match annotation {
        TypeAnnotation::Boolean => Some(json!({"type": "boolean"})),
        TypeAnnotation::Integer => Some(json!({"type": "integer"})),
        TypeAnnotation::Float => Some(json!({"type": "number"})),
        TypeAnnotation::Text => Some(json!({"type": "string"})),
        TypeAnnotation::Sequence(item) => match item.as_deref() {
            Some(TypeAnnotation::Text) | Some(TypeAnnotation::Any) | None => {
                Some(json!({"type": "array", "items": {"type": "string"}}))
            }
            Some(TypeAnnotation::Integer) => {
                Some(json!({"type": "array", "items": {"type": "integer"}}))
            }
            Some(_) => None,
        },
        TypeAnnotation::Model { .. } | TypeAnnotation::Any | TypeAnnotation::Other(_) => None,
    }
}

/// Schema fragment for a parameter annotation; falls back to `{"type":"string"}`.
pub fn input_fragment(annotation: &TypeAnnotation) -> Value {
    primitive_fragment(annotation).unwrap_or_else(|| json!({"type": "string"}))
}

/// Output schema for a return annotation; falls back to `{"type":"object"}`.
pub fn output_fragment(annotation: Option<&TypeAnnotation>) -> Schema {
    match annotation {
        Some(TypeAnnotation::Model { schema, .. }) => schema.clone(),
        Some(other) => primitive_fragment(other)
            .and_then(|v| Schema::try_from(v).ok())
            .unwrap_or_else(|| json_schema!({"type": "object"})),
        None => json_schema!({"type": "object"}),
    }
}

/// Infer the input schema of `signature`.
pub fn infer_input_schema(signature: &Signature) -> InputSchema {
    let mut schema = InputSchema::empty();
    for param in &signature.params {
        if let Some(annotation) = &param.annotation {
            schema
                .properties
                .insert(param.name.clone(), input_fragment(annotation));
        }
        if !param.has_default {
            schema.required.push(param.name.clone());
        }
    }
    schema
}

/// Infer the output schema; an explicit output model always wins.
pub fn infer_output_schema(signature: &Signature, output_model: Option<&OutputModel>) -> Schema {
    match output_model {
        Some(model) => model.schema().clone(),
        None => output_fragment(signature.returns.as_ref()),
    }
}

/// Infer `(input_schema, output_schema)` for `signature`.
pub fn infer_schemas(
    signature: &Signature,
    output_model: Option<&OutputModel>,
) -> (InputSchema, Schema) {
    (
        infer_input_schema(signature),
        infer_output_schema(signature, output_model),
    )
}
