//! Agent abstractions.
//!
//! An [`Agent`] is configuration: instructions, a tool registry, an approval
//! policy, a model provider, and a turn budget. The [`Runner`] is the
//! execution engine that drives an agent's reasoning loop against a session
//! store, suspending at the approval gate and resuming on a reviewer's
//! [`Decision`](crate::approval::Decision).

mod reviewer;
mod runner;

pub use reviewer::{AlwaysReject, AutoApprove, Reviewer};
pub use runner::{RunOutcome, Runner, SuspendedHandle};

use std::sync::Arc;

use crate::approval::ApprovalPolicy;
use crate::error::Result;
use crate::provider::ModelProvider;
use crate::tool::{Tool, ToolRegistry};

/// Default maximum number of reasoning turns per user request.
pub const DEFAULT_MAX_TURNS: usize = 10;

/// A configured agent: what it can do and under which rules.
pub struct Agent {
    pub(crate) name: String,
    pub(crate) instructions: String,
    pub(crate) registry: ToolRegistry,
    pub(crate) policy: ApprovalPolicy,
    pub(crate) provider: Arc<dyn ModelProvider>,
    pub(crate) max_turns: usize,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("tools", &self.registry.names())
            .field("max_turns", &self.max_turns)
            .finish_non_exhaustive()
    }
}

impl Agent {
    /// Start building an agent.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(name)
    }

    /// The agent's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The approval policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &ApprovalPolicy {
        &self.policy
    }

    /// The tool registry.
    #[must_use]
    pub const fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

/// Builder for [`Agent`].
pub struct AgentBuilder {
    name: String,
    instructions: String,
    registry: ToolRegistry,
    policy: Option<ApprovalPolicy>,
    provider: Option<Arc<dyn ModelProvider>>,
    max_turns: usize,
    register_error: Option<crate::error::Error>,
}

impl std::fmt::Debug for AgentBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentBuilder")
            .field("name", &self.name)
            .field("tools", &self.registry.names())
            .finish_non_exhaustive()
    }
}

impl AgentBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            registry: ToolRegistry::new(),
            policy: None,
            provider: None,
            max_turns: DEFAULT_MAX_TURNS,
            register_error: None,
        }
    }

    /// Set the system instructions.
    #[must_use]
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Register a tool. Duplicate names surface as an error from
    /// [`AgentBuilder::build`].
    #[must_use]
    pub fn tool(mut self, tool: impl Tool + 'static) -> Self {
        if self.register_error.is_none()
            && let Err(e) = self.registry.register(tool)
        {
            self.register_error = Some(e);
        }
        self
    }

    /// Set the approval policy. Required; there is no implicit policy.
    #[must_use]
    pub fn policy(mut self, policy: ApprovalPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set the model provider.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the turn budget.
    #[must_use]
    pub const fn max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Build the agent.
    ///
    /// # Errors
    ///
    /// Returns the deferred [`crate::Error::DuplicateTool`] if two tools
    /// shared a name, or [`crate::Error::Provider`] if no provider or policy
    /// was configured.
    pub fn build(self) -> Result<Agent> {
        if let Some(e) = self.register_error {
            return Err(e);
        }
        let provider = self.provider.ok_or_else(|| {
            crate::error::Error::provider(format!("agent '{}' has no provider configured", self.name))
        })?;
        let policy = self.policy.ok_or_else(|| {
            crate::error::Error::provider(format!(
                "agent '{}' has no approval policy configured",
                self.name
            ))
        })?;
        Ok(Agent {
            name: self.name,
            instructions: self.instructions,
            registry: self.registry,
            policy,
            provider,
            max_turns: self.max_turns,
        })
    }
}
