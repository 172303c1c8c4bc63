//! Unified error types for the vouch runtime.
//!
//! Tool-handler failures are deliberately *not* part of this taxonomy's fatal
//! surface: the agent loop recovers them by feeding a descriptive string back
//! to the model as a tool result. Everything here is either a registration
//! problem, a protocol misuse, or a hard failure of the current request.

use crate::tool::ToolError;

/// The main error type for vouch operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tool call named a tool that is not registered.
    #[error("unknown tool: '{0}'")]
    UnknownTool(String),

    /// A tool was registered under a name that is already taken.
    #[error("duplicate tool: '{0}' is already registered")]
    DuplicateTool(String),

    /// Tool-call arguments did not satisfy the tool's input schema.
    #[error("invalid arguments for '{tool}': {reason}")]
    InvalidArguments {
        /// The tool whose schema was violated.
        tool: String,
        /// What the validator objected to.
        reason: String,
    },

    /// The tool handler itself failed.
    ///
    /// The agent loop converts this into a string tool result rather than
    /// aborting, so it only escapes to callers who invoke the registry
    /// directly.
    #[error("tool '{tool}' failed: {source}")]
    ToolExecution {
        /// The failing tool.
        tool: String,
        /// The handler's error.
        #[source]
        source: ToolError,
    },

    /// `resume` was called on a session with no pending action.
    ///
    /// Also raised when a decision is submitted twice for the same pending
    /// action: the first resume clears it, so the second one lands here
    /// instead of double-executing.
    #[error("session '{0}' has no pending action to resume")]
    NoPendingAction(String),

    /// The loop performed its maximum number of reasoning turns without
    /// reaching a final answer. Fatal to the request, not to the session.
    #[error("turn budget of {0} exceeded without a final answer")]
    TurnBudgetExceeded(usize),

    /// The model provider failed (HTTP error, malformed response, ...).
    #[error("provider: {0}")]
    Provider(String),

    /// Session (de)serialization failure.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Session storage I/O failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a provider error from a message.
    #[inline]
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create an invalid-arguments error.
    #[inline]
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for vouch operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        let err = Error::UnknownTool("frobnicate".into());
        assert_eq!(err.to_string(), "unknown tool: 'frobnicate'");

        let err = Error::invalid_arguments("add", "missing required field 'x'");
        assert!(err.to_string().contains("add"));
        assert!(err.to_string().contains("missing required field"));

        let err = Error::TurnBudgetExceeded(10);
        assert!(err.to_string().contains("10"));
    }
}
