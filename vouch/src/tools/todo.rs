//! Planning tool: the agent writes down a task list before acting.
//!
//! Gating this tool gives the reviewer a veto over the *plan*, not just the
//! individual actions. Reject it with feedback and the model replans.

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::{FieldType, InputSchema};
use crate::tool::{Tool, ToolError};

/// Tool for saving a stateful plan of action.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteTodosTool;

impl WriteTodosTool {
    /// Create the planning tool.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for WriteTodosTool {
    fn name(&self) -> &str {
        "write_todos"
    }

    fn description(&self) -> &str {
        "Call this tool FIRST to create a plan of action. Provide the list of steps and a short reason for the plan."
    }

    fn schema(&self) -> InputSchema {
        InputSchema::new()
            .required("tasks", FieldType::List, "Steps to perform, in order")
            .required("reason", FieldType::String, "Why this plan was chosen")
    }

    async fn call(&self, args: Value) -> Result<String, ToolError> {
        let tasks = args["tasks"]
            .as_array()
            .ok_or_else(|| ToolError::execution("tasks must be an array"))?;
        for (i, task) in tasks.iter().enumerate() {
            if !task.is_string() {
                return Err(ToolError::execution(format!(
                    "task {} is not a string",
                    i + 1
                )));
            }
        }
        Ok(format!(
            "Plan with {} step(s) saved successfully. You may now proceed with step 1.",
            tasks.len()
        ))
    }
}

/// Render a `write_todos` argument object as a numbered task list.
///
/// Returns `None` if the arguments don't look like a plan; callers fall back
/// to the generic pending-action rendering.
#[must_use]
pub fn format_plan(args: &Value) -> Option<String> {
    let tasks = args.get("tasks")?.as_array()?;
    let mut out = String::from("Proposed plan:\n");
    for (i, task) in tasks.iter().enumerate() {
        let step = task.as_str()?;
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }
    if let Some(reason) = args.get("reason").and_then(Value::as_str) {
        out.push_str(&format!("  (Reason: {reason})"));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_saves_plan() {
        let tool = WriteTodosTool::new();
        let result = tool
            .call(json!({
                "tasks": ["Check the weather", "Save it to disk"],
                "reason": "Two-step request"
            }))
            .await
            .unwrap();
        assert!(result.contains("2 step(s)"));
    }

    #[tokio::test]
    async fn test_non_string_task_rejected() {
        let tool = WriteTodosTool::new();
        let err = tool
            .call(json!({"tasks": ["ok", 42], "reason": "r"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("task 2"));
    }

    #[test]
    fn test_format_plan() {
        let rendered = format_plan(&json!({
            "tasks": ["Check weather in Austin", "Write result to file"],
            "reason": "User asked for both"
        }))
        .unwrap();
        assert!(rendered.contains("1. Check weather in Austin"));
        assert!(rendered.contains("2. Write result to file"));
        assert!(rendered.contains("Reason: User asked for both"));

        assert!(format_plan(&json!({"other": true})).is_none());
    }
}
