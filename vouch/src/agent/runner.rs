//! The agent execution engine.
//!
//! The loop walks a small state machine per user request:
//!
//! - **thinking** — the provider is given the history and tool schemas and
//!   returns either final text or a batch of tool calls;
//! - **executing** — approved calls run strictly in emission order, each
//!   result appended to history (failures included, as data);
//! - **awaiting approval** — a call gated by the policy suspends the loop
//!   *before any side effect*: the pending action is persisted on the
//!   session and control returns to the caller;
//! - **done** — the provider produced a final answer.
//!
//! Resumption reconstructs the execution point from the persisted session
//! alone, so a decision can arrive from a different process than the one
//! that suspended.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::approval::{Decision, PendingAction};
use crate::error::{Error, Result};
use crate::message::{Message, ToolCall};
use crate::session::{Session, SharedStore};

use super::{Agent, Reviewer};

/// Result of advancing the loop.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The model produced a final answer.
    Complete(String),
    /// The loop is suspended at the approval gate.
    Suspended(SuspendedHandle),
}

/// Description of a suspension, for display to a reviewer.
#[derive(Debug, Clone)]
pub struct SuspendedHandle {
    /// The suspended session.
    pub session_id: String,
    /// The action awaiting a decision.
    pub action: PendingAction,
    /// Pre-rendered review prompt (policy prefix + tool + arguments).
    pub description: String,
}

enum BatchOutcome {
    Completed,
    Suspended(PendingAction),
}

/// Execution engine that drives agents against a session store.
///
/// Owns the store and a per-session lock map: one session is never advanced
/// by two callers at once, while distinct sessions run fully in parallel.
pub struct Runner {
    store: SharedStore,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner").finish_non_exhaustive()
    }
}

impl Runner {
    /// Create a runner over the given session store.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying session store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    async fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        Arc::clone(
            self.locks
                .lock()
                .await
                .entry(session_id.to_owned())
                .or_default(),
        )
    }

    /// Start (or continue) a conversation with a new user message.
    ///
    /// Loads the session (creating it on first contact), appends the user
    /// message, and drives the loop until it completes or suspends. If the
    /// session already has an undecided pending action, the same suspension
    /// is re-emitted instead of advancing; submit a decision via
    /// [`Runner::resume`] first.
    ///
    /// # Errors
    ///
    /// [`Error::TurnBudgetExceeded`] if the request used up its reasoning
    /// turns, or storage/provider failures.
    pub async fn run(&self, agent: &Agent, session_id: &str, input: &str) -> Result<RunOutcome> {
        let lock = self.session_lock(session_id).await;
        let _guard = lock.lock().await;

        let mut session = self
            .store
            .load(session_id)
            .await?
            .unwrap_or_else(|| Session::new(session_id));

        if let Some(pending) = session.pending.clone() {
            warn!(session = %session_id, tool = %pending.tool_name,
                "run called while a decision is outstanding");
            return Ok(RunOutcome::Suspended(self.handle_for(agent, &session, pending)));
        }

        info!(session = %session_id, agent = %agent.name, "starting request");
        session.push(Message::user(input));
        self.drive(agent, session).await
    }

    /// Resolve a pending action and continue the loop.
    ///
    /// # Errors
    ///
    /// [`Error::NoPendingAction`] if the session has no undecided action,
    /// including the case where the same decision is submitted twice, which
    /// therefore never double-executes a tool.
    pub async fn resume(
        &self,
        agent: &Agent,
        session_id: &str,
        decision: Decision,
    ) -> Result<RunOutcome> {
        let lock = self.session_lock(session_id).await;
        let _guard = lock.lock().await;

        let mut session = self
            .store
            .load(session_id)
            .await?
            .ok_or_else(|| Error::NoPendingAction(session_id.to_owned()))?;

        let pending = session
            .pending
            .take()
            .ok_or_else(|| Error::NoPendingAction(session_id.to_owned()))?;

        let call = session
            .current_batch()
            .and_then(|batch| batch.get(pending.position))
            .filter(|call| call.name == pending.tool_name)
            .cloned()
            .ok_or_else(|| Error::NoPendingAction(session_id.to_owned()))?;

        match decision {
            Decision::Approve => {
                info!(session = %session_id, tool = %call.name, "action approved");
                self.execute_call(agent, &mut session, &call).await;
            }
            Decision::Reject { feedback } => {
                info!(session = %session_id, tool = %call.name, "action rejected");
                session.push(Message::tool_error(
                    &call,
                    format!("The user rejected this tool call. Feedback: {feedback}"),
                ));
            }
        }

        // The rest of the batch is evaluated independently of this decision.
        match self.execute_batch(agent, &mut session, pending.position + 1).await {
            BatchOutcome::Suspended(action) => {
                session.pending = Some(action.clone());
                self.store.save(&session).await?;
                Ok(RunOutcome::Suspended(self.handle_for(agent, &session, action)))
            }
            BatchOutcome::Completed => self.drive(agent, session).await,
        }
    }

    /// Drive a request to completion, delegating every suspension to the
    /// given reviewer.
    ///
    /// # Errors
    ///
    /// Same as [`Runner::run`] and [`Runner::resume`].
    pub async fn run_to_completion(
        &self,
        agent: &Agent,
        session_id: &str,
        input: &str,
        reviewer: &dyn Reviewer,
    ) -> Result<String> {
        let mut outcome = self.run(agent, session_id, input).await?;
        loop {
            match outcome {
                RunOutcome::Complete(text) => return Ok(text),
                RunOutcome::Suspended(handle) => {
                    let decision = reviewer.review(&handle.action).await;
                    outcome = self.resume(agent, session_id, decision).await?;
                }
            }
        }
    }

    /// The thinking/executing loop. Expects no pending action on entry.
    async fn drive(&self, agent: &Agent, mut session: Session) -> Result<RunOutcome> {
        let definitions = agent.registry.definitions();

        loop {
            self.store.save(&session).await?;

            if session.turns_since_user() >= agent.max_turns {
                warn!(session = %session.id, budget = agent.max_turns, "turn budget exceeded");
                return Err(Error::TurnBudgetExceeded(agent.max_turns));
            }

            debug!(session = %session.id, turn = session.turns_since_user() + 1, "thinking");
            let turn = agent
                .provider
                .complete(&agent.instructions, &session.history, &definitions)
                .await?;

            let is_final = turn.is_final();
            session.push(Message::Assistant {
                text: turn.text.clone(),
                tool_calls: turn.tool_calls,
            });

            if is_final {
                self.store.save(&session).await?;
                info!(session = %session.id, "request complete");
                return Ok(RunOutcome::Complete(turn.text));
            }

            match self.execute_batch(agent, &mut session, 0).await {
                BatchOutcome::Suspended(action) => {
                    session.pending = Some(action.clone());
                    self.store.save(&session).await?;
                    info!(session = %session.id, tool = %action.tool_name, "suspended for approval");
                    return Ok(RunOutcome::Suspended(self.handle_for(agent, &session, action)));
                }
                BatchOutcome::Completed => {}
            }
        }
    }

    /// Evaluate the current batch from `start` onward, strictly in emission
    /// order. Stops at the first call the policy gates; nothing of that call
    /// has run when it does.
    async fn execute_batch(
        &self,
        agent: &Agent,
        session: &mut Session,
        start: usize,
    ) -> BatchOutcome {
        let calls: Vec<ToolCall> = session
            .current_batch()
            .map(<[ToolCall]>::to_vec)
            .unwrap_or_default();

        for (position, call) in calls.iter().enumerate().skip(start) {
            if agent.policy.requires_approval(&call.name) {
                return BatchOutcome::Suspended(PendingAction {
                    tool_name: call.name.clone(),
                    arguments: call.arguments.clone(),
                    position,
                });
            }
            self.execute_call(agent, session, call).await;
        }

        BatchOutcome::Completed
    }

    /// Invoke one tool call and append its result. Failures become error
    /// tool results for the model, never a crashed request.
    async fn execute_call(&self, agent: &Agent, session: &mut Session, call: &ToolCall) {
        debug!(session = %session.id, tool = %call.name, "executing tool");
        match agent
            .registry
            .invoke(&call.name, call.arguments.clone())
            .await
        {
            Ok(output) => session.push(Message::tool_result(call, output)),
            Err(e) => {
                warn!(session = %session.id, tool = %call.name, error = %e, "tool call failed");
                session.push(Message::tool_error(call, e.to_string()));
            }
        }
    }

    fn handle_for(&self, agent: &Agent, session: &Session, action: PendingAction) -> SuspendedHandle {
        let description = action.render(agent.policy.prefix());
        SuspendedHandle {
            session_id: session.id.clone(),
            action,
            description,
        }
    }
}
