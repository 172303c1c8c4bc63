//! Session state: conversation history plus the suspension point.
//!
//! A [`Session`] is the full continuation state of one conversation. Saving
//! and reloading it reconstructs exactly where the loop left off: message
//! order, tool-call arguments, and the pending action if the loop is
//! suspended at the approval gate.

pub mod store;

pub use store::{FileStore, MemoryStore, SessionStore, SharedStore};

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::approval::PendingAction;
use crate::message::{Message, ToolCall};

/// Persistent state of one conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Append-only conversation history in causal order.
    pub history: Vec<Message>,
    /// Set while the loop is suspended at the approval gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingAction>,
    /// Creation timestamp (Unix milliseconds).
    pub created_at: u64,
    /// Last mutation timestamp (Unix milliseconds).
    pub updated_at: u64,
}

impl Session {
    /// Create a new empty session.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let now = timestamp_ms();
        Self {
            id: id.into(),
            history: Vec::new(),
            pending: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message and bump the update timestamp.
    pub fn push(&mut self, message: Message) {
        self.history.push(message);
        self.updated_at = timestamp_ms();
    }

    /// The most recent assistant message's tool-call batch, if any.
    ///
    /// This is the batch a [`PendingAction`]'s `position` indexes into.
    #[must_use]
    pub fn current_batch(&self) -> Option<&[ToolCall]> {
        self.history.iter().rev().find_map(|msg| match msg {
            Message::Assistant { tool_calls, .. } if !tool_calls.is_empty() => {
                Some(tool_calls.as_slice())
            }
            _ => None,
        })
    }

    /// Number of assistant turns since the latest user message.
    ///
    /// This is the request-local turn count the budget applies to; deriving
    /// it from history keeps the budget stable across suspend/resume cycles
    /// and process restarts.
    #[must_use]
    pub fn turns_since_user(&self) -> usize {
        self.history
            .iter()
            .rev()
            .take_while(|msg| !msg.is_user())
            .filter(|msg| msg.is_assistant())
            .count()
    }
}

/// Current Unix time in milliseconds.
fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
