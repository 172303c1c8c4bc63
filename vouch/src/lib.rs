//! Vouch is a runtime for LLM agents whose sensitive tool calls pass through
//! a human approval gate.
//!
//! The loop is an explicit, serializable state machine: when the model asks
//! for a tool the [`ApprovalPolicy`](approval::ApprovalPolicy) gates, the
//! run suspends *before any side effect*, the pending action is persisted
//! with the session, and a later [`Decision`](approval::Decision), possibly
//! from another process, resumes execution exactly where it stopped.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vouch::prelude::*;
//!
//! let agent = Agent::builder("assistant")
//!     .instructions("You are a helpful assistant.")
//!     .tool(WeatherTool::new())
//!     .tool(WriteFileTool::new("./workspace"))
//!     .policy(ApprovalPolicy::new(PolicyDefault::AutoApprove).require("write_file"))
//!     .provider(Arc::new(OpenAiProvider::new(api_key, "gpt-4o-mini")))
//!     .build()?;
//!
//! let runner = Runner::new(Arc::new(MemoryStore::new()));
//! match runner.run(&agent, "session-1", "save 'hi' to out.txt").await? {
//!     RunOutcome::Complete(text) => println!("{text}"),
//!     RunOutcome::Suspended(handle) => {
//!         // show handle.description to a human, then:
//!         runner.resume(&agent, "session-1", Decision::Approve).await?;
//!     }
//! }
//! ```

pub mod agent;
pub mod approval;
pub mod error;
pub mod message;
pub mod prelude;
pub mod provider;
pub mod retrieval;
pub mod schema;
pub mod session;
pub mod tool;
pub mod tools;

pub use agent::{Agent, RunOutcome, Runner};
pub use approval::{ApprovalPolicy, Decision, PendingAction, PolicyDefault};
pub use error::{Error, Result};
pub use message::{Message, ToolCall};
pub use session::Session;
