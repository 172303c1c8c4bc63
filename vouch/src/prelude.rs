//! Convenience re-exports for common usage.

pub use crate::agent::{
    Agent, AgentBuilder, AlwaysReject, AutoApprove, Reviewer, RunOutcome, Runner, SuspendedHandle,
};
pub use crate::approval::{ApprovalPolicy, Decision, PendingAction, PolicyDefault};
pub use crate::error::{Error, Result};
pub use crate::message::{Message, ToolCall};
pub use crate::provider::{ModelProvider, ModelTurn, OpenAiProvider};
pub use crate::retrieval::CorpusIndex;
pub use crate::schema::{FieldType, InputSchema};
pub use crate::session::{FileStore, MemoryStore, Session, SessionStore, SharedStore};
pub use crate::tool::{Tool, ToolError, ToolRegistry};
pub use crate::tools::{CalculatorTool, SearchTool, WeatherTool, WriteFileTool, WriteTodosTool};
