//! Error type for tool handlers.

/// Errors a tool handler can raise.
///
/// Handlers report failures as data: the agent loop converts a `ToolError`
/// into a string tool result for the model rather than aborting the run.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Error returned by the handler itself.
    #[error("{0}")]
    Execution(String),

    /// De/serialization failure while handling arguments.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure inside the handler.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// Create an execution error from a message.
    #[inline]
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }
}
