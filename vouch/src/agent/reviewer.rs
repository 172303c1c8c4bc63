//! The human reviewer seam.
//!
//! Anything that can turn a [`PendingAction`] into a [`Decision`] can act as
//! the reviewer: a CLI prompt, a web form, a queue consumer. A deployment
//! that wants a review timeout implements it here and maps expiry to
//! [`Decision::Reject`] with system-generated feedback.

use async_trait::async_trait;

use crate::approval::{Decision, PendingAction};

/// Collects a decision for a pending action.
#[async_trait]
pub trait Reviewer: Send + Sync {
    /// Present the action and return the reviewer's ruling.
    ///
    /// May block indefinitely; the loop's state is persisted before this is
    /// called, so an abandoned review leaves the session resumable.
    async fn review(&self, action: &PendingAction) -> Decision;
}

/// Reviewer that approves everything. For tests and trusted wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

#[async_trait]
impl Reviewer for AutoApprove {
    async fn review(&self, _action: &PendingAction) -> Decision {
        Decision::Approve
    }
}

/// Reviewer that rejects everything with a fixed feedback message. For
/// tests and strict lockdown wiring.
#[derive(Debug, Clone)]
pub struct AlwaysReject {
    feedback: String,
}

impl AlwaysReject {
    /// Create a rejecting reviewer with the given feedback text.
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
        }
    }
}

impl Default for AlwaysReject {
    fn default() -> Self {
        Self::new("rejected by policy")
    }
}

#[async_trait]
impl Reviewer for AlwaysReject {
    async fn review(&self, _action: &PendingAction) -> Decision {
        Decision::reject(self.feedback.clone())
    }
}
