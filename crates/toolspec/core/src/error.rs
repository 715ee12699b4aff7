//! Unified error type for tool specifications and adapters.

use crate::capabilities::Framework;
use thiserror::Error;

/// Boxed error produced by a wrapped function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type returned by toolkit operations.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The target framework is not available in this build or environment.
    #[error("{framework} support is unavailable: {}", .framework.install_hint())]
    Unavailable {
        /// Framework whose adapter could not be constructed.
        framework: Framework,
    },

    /// Error raised by the wrapped function itself, passed through untouched.
    #[error(transparent)]
    Function(BoxError),

    /// Keyword arguments could not be decoded or failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A specification record was built from invalid metadata.
    #[error("invalid tool spec: {0}")]
    InvalidSpec(String),

    /// Requested tool not found.
    #[error("{0}")]
    NotFound(String),

    /// Internal error (serialization and the like).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create an unavailable-dependency error.
    pub fn unavailable(framework: Framework) -> Self {
        ToolError::Unavailable { framework }
    }

    /// Wrap an error returned by a tool function.
    pub fn function<E: Into<BoxError>>(e: E) -> Self {
        ToolError::Function(e.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input<S: ToString>(s: S) -> Self {
        ToolError::InvalidInput(s.to_string())
    }

    /// Create an invalid spec error.
    pub fn invalid_spec<S: ToString>(s: S) -> Self {
        ToolError::InvalidSpec(s.to_string())
    }

    /// Create a not found error.
    pub fn not_found<S: ToString>(s: S) -> Self {
        ToolError::NotFound(s.to_string())
    }

    /// Create an internal error.
    pub fn internal<S: ToString>(s: S) -> Self {
        ToolError::Internal(s.to_string())
    }

    /// True for the unavailable-dependency variant.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ToolError::Unavailable { .. })
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        ToolError::internal(e)
    }
}
