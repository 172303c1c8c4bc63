//! Model provider seam.
//!
//! From the loop's perspective the reasoning model is a pure decision
//! function: given the instructions, the conversation so far, and the tool
//! schemas, it returns either final text or a batch of tool calls. Anything
//! that satisfies [`ModelProvider`] can drive the loop. The bundled
//! [`OpenAiProvider`] speaks the chat-completions wire format, tests use
//! scripted providers.

pub mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::message::{Message, ToolCall};
use crate::tool::ToolDefinition;

/// One reasoning step's output.
#[derive(Debug, Clone, Default)]
pub struct ModelTurn {
    /// Assistant text. The final answer when `tool_calls` is empty.
    pub text: String,
    /// Requested tool calls, in emission order.
    pub tool_calls: Vec<ToolCall>,
}

impl ModelTurn {
    /// A terminal turn carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: Vec::new(),
        }
    }

    /// A turn requesting the given tool calls.
    #[must_use]
    pub fn calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            text: String::new(),
            tool_calls,
        }
    }

    /// Whether this turn ends the loop.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.tool_calls.is_empty()
    }
}

/// Async trait for the reasoning-model collaborator.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Produce the next step for the given conversation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Provider`] on transport or decode failure.
    async fn complete(
        &self,
        instructions: &str,
        history: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelTurn>;
}
