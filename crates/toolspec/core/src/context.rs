//! Invocation context handed to agent-runtime tools.

/// Context passed to an OpenAI Agents function tool on each invocation.
#[derive(Clone, Default, Debug)]
pub struct ToolContext {
    tool_call_id: Option<String>,
}

impl ToolContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tool_call_id(mut self, id: impl Into<String>) -> Self {
        self.tool_call_id = Some(id.into());
        self
    }

    /// Identifier of the model's tool call, when the runtime supplies one.
    pub fn tool_call_id(&self) -> Option<&str> {
        self.tool_call_id.as_deref()
    }
}
