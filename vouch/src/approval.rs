//! Approval policy and the pending-action / decision types.
//!
//! The policy answers one question per tool: does executing it require a
//! human decision first? Unlisted tools resolve through an explicit
//! [`PolicyDefault`]; auto-approving unknown tools is a security stance the
//! caller has to take on purpose, not a silent fallback.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default ruling for tools without an explicit rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyDefault {
    /// Unlisted tools run without review. Convenient for demo wiring;
    /// every newly registered tool is immediately executable.
    AutoApprove,
    /// Unlisted tools suspend for review. The safe choice when tools are
    /// registered dynamically.
    RequireApproval,
}

/// Per-tool approval rules.
#[derive(Debug, Clone)]
pub struct ApprovalPolicy {
    default: PolicyDefault,
    rules: HashMap<String, bool>,
    description_prefix: String,
}

impl ApprovalPolicy {
    /// Create a policy with the given default for unlisted tools.
    #[must_use]
    pub fn new(default: PolicyDefault) -> Self {
        Self {
            default,
            rules: HashMap::new(),
            description_prefix: "REVIEW REQUIRED".to_owned(),
        }
    }

    /// Mark a tool as requiring human approval.
    #[must_use]
    pub fn require(mut self, tool_name: impl Into<String>) -> Self {
        self.rules.insert(tool_name.into(), true);
        self
    }

    /// Mark a tool as auto-approved, overriding a stricter default.
    #[must_use]
    pub fn auto(mut self, tool_name: impl Into<String>) -> Self {
        self.rules.insert(tool_name.into(), false);
        self
    }

    /// Set the prefix shown when a pending action is rendered for review.
    #[must_use]
    pub fn description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.description_prefix = prefix.into();
        self
    }

    /// Whether executing `tool_name` needs a human decision.
    #[must_use]
    pub fn requires_approval(&self, tool_name: &str) -> bool {
        self.rules.get(tool_name).copied().unwrap_or(matches!(
            self.default,
            PolicyDefault::RequireApproval
        ))
    }

    /// The configured default for unlisted tools.
    #[must_use]
    pub const fn default_ruling(&self) -> PolicyDefault {
        self.default
    }

    /// The review prompt prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.description_prefix
    }
}

/// A tool call halted at the approval gate.
///
/// Persisted on the session while the loop is suspended. `position` indexes
/// into the tool-call batch of the most recent assistant message, which is
/// how resumption re-derives the not-yet-evaluated remainder of the batch
/// from history alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAction {
    /// Name of the gated tool.
    pub tool_name: String,
    /// Arguments the model supplied.
    pub arguments: Value,
    /// Index of this call within its assistant message's batch.
    pub position: usize,
}

impl PendingAction {
    /// Render the action for a human reviewer.
    #[must_use]
    pub fn render(&self, prefix: &str) -> String {
        let args = serde_json::to_string_pretty(&self.arguments)
            .unwrap_or_else(|_| self.arguments.to_string());
        format!(
            "{prefix}: tool '{}' wants to execute with arguments:\n{args}",
            self.tool_name
        )
    }
}

/// The human reviewer's ruling on a [`PendingAction`].
///
/// Consumed exactly once; resolving the same pending action twice is a
/// protocol error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Execute the pending call.
    Approve,
    /// Skip the call and feed `feedback` back to the model as the tool
    /// outcome.
    Reject {
        /// Why the reviewer declined.
        feedback: String,
    },
}

impl Decision {
    /// Create a rejection with feedback text.
    pub fn reject(feedback: impl Into<String>) -> Self {
        Self::Reject {
            feedback: feedback.into(),
        }
    }

    /// Whether this decision permits execution.
    #[must_use]
    pub const fn is_approve(&self) -> bool {
        matches!(self, Self::Approve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_rules_win_over_default() {
        let policy = ApprovalPolicy::new(PolicyDefault::AutoApprove)
            .require("write_file")
            .require("write_todos")
            .auto("get_weather");

        assert!(policy.requires_approval("write_file"));
        assert!(policy.requires_approval("write_todos"));
        assert!(!policy.requires_approval("get_weather"));
        // Unlisted tool falls through to the default.
        assert!(!policy.requires_approval("calculate_math"));
    }

    #[test]
    fn test_strict_default() {
        let policy = ApprovalPolicy::new(PolicyDefault::RequireApproval).auto("rag_search");
        assert!(policy.requires_approval("anything_else"));
        assert!(!policy.requires_approval("rag_search"));
    }

    #[test]
    fn test_render_includes_name_and_args() {
        let action = PendingAction {
            tool_name: "write_file".into(),
            arguments: json!({"filename": "out.txt", "content": "hi"}),
            position: 0,
        };
        let text = action.render("REVIEW REQUIRED");
        assert!(text.starts_with("REVIEW REQUIRED"));
        assert!(text.contains("write_file"));
        assert!(text.contains("out.txt"));
    }

    #[test]
    fn test_decision_serde() {
        let encoded = serde_json::to_value(Decision::reject("not now")).unwrap();
        assert_eq!(encoded["decision"], "reject");
        assert_eq!(encoded["feedback"], "not now");

        let decoded: Decision = serde_json::from_value(json!({"decision": "approve"})).unwrap();
        assert!(decoded.is_approve());
    }
}
