//! Conversation messages.
//!
//! A session's history is an append-only sequence of [`Message`]s in causal
//! order. The order is the ground truth the loop resumes from, so the serde
//! representation round-trips it exactly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id, used to pair results with requests.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// Arguments as a JSON object.
    pub arguments: Value,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// One entry in a session's conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    /// A message from the human user.
    User {
        /// The user's text.
        text: String,
    },

    /// A reasoning step from the model: optional text plus zero or more
    /// tool calls, in emission order.
    Assistant {
        /// Free-form assistant text (the final answer when `tool_calls`
        /// is empty).
        text: String,
        /// Tool calls requested this step, in the order the model emitted
        /// them.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },

    /// The outcome of one tool call, including rejections and recovered
    /// execution failures.
    Tool {
        /// Id of the [`ToolCall`] this result answers.
        call_id: String,
        /// Name of the tool.
        tool_name: String,
        /// The tool's string output, an error description, or the
        /// reviewer's rejection feedback.
        content: String,
        /// Whether this result reports a failure or rejection rather than
        /// a successful execution.
        #[serde(default)]
        is_error: bool,
    },
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { text: text.into() }
    }

    /// Create a plain assistant message with no tool calls.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Create a successful tool-result message for the given call.
    pub fn tool_result(call: &ToolCall, content: impl Into<String>) -> Self {
        Self::Tool {
            call_id: call.id.clone(),
            tool_name: call.name.clone(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Create a tool-result message reporting an error or rejection.
    pub fn tool_error(call: &ToolCall, content: impl Into<String>) -> Self {
        Self::Tool {
            call_id: call.id.clone(),
            tool_name: call.name.clone(),
            content: content.into(),
            is_error: true,
        }
    }

    /// Returns `true` for [`Message::User`].
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    /// Returns `true` for [`Message::Assistant`].
    #[must_use]
    pub const fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serde_round_trip_preserves_order_and_args() {
        let call = ToolCall::new("call_1", "write_file", json!({"filename": "out.txt"}));
        let history = vec![
            Message::user("write 'hi' to out.txt"),
            Message::Assistant {
                text: String::new(),
                tool_calls: vec![call.clone()],
            },
            Message::tool_error(&call, "rejected: not now"),
            Message::assistant("Understood, I won't write the file."),
        ];

        let encoded = serde_json::to_string(&history).unwrap();
        let decoded: Vec<Message> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(history, decoded);
    }

    #[test]
    fn test_role_tags() {
        let encoded = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(encoded["role"], "user");

        let encoded = serde_json::to_value(Message::assistant("hello")).unwrap();
        assert_eq!(encoded["role"], "assistant");
        // Empty tool_calls are omitted from the wire form.
        assert!(encoded.get("tool_calls").is_none());
    }
}
