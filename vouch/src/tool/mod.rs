//! Tool abstractions.
//!
//! The [`Tool`] trait is the contract a capability exposes to the agent
//! loop: a unique name, a static [`InputSchema`], and an async handler that
//! turns a JSON argument object into a string result. The [`ToolRegistry`]
//! owns a set of tools and performs name resolution and argument validation
//! before any handler runs.

pub mod errors;
pub mod registry;

pub use errors::ToolError;
pub use registry::ToolRegistry;

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::InputSchema;

/// A capability the agent can invoke.
///
/// Implementations must be `Send + Sync`; handlers are called from async
/// tasks. Side effects are entirely the handler's business; the loop only
/// guarantees that gated tools are never called before an approval.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Description shown to the model.
    fn description(&self) -> &str;

    /// The declared argument structure. Built once, at registration.
    fn schema(&self) -> InputSchema;

    /// Execute the tool with validated arguments.
    async fn call(&self, args: Value) -> Result<String, ToolError>;
}

/// A heap-allocated, type-erased tool.
pub type BoxedTool = Box<dyn Tool>;

/// Provider-facing description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON-schema object for the arguments.
    pub parameters: Value,
}
