//! File write tool.
//!
//! Writes are confined to a workspace directory: relative paths only, no
//! parent traversal. This is the canonical gated tool: it has a real side
//! effect, so the approval gate's "nothing runs before the decision"
//! guarantee is what keeps a rejection side-effect free.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use crate::schema::{FieldType, InputSchema};
use crate::tool::{Tool, ToolError};

/// Tool that writes content to a file under a workspace root.
#[derive(Debug, Clone)]
pub struct WriteFileTool {
    workspace: PathBuf,
}

impl WriteFileTool {
    /// Create a write tool rooted at `workspace`.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf, ToolError> {
        let relative = Path::new(filename);
        if relative.is_absolute() {
            return Err(ToolError::execution("absolute paths are not allowed"));
        }
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => {
                    return Err(ToolError::execution(
                        "path may not traverse outside the workspace",
                    ));
                }
            }
        }
        Ok(self.workspace.join(relative))
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file on the local disk, relative to the workspace directory."
    }

    fn schema(&self) -> InputSchema {
        InputSchema::new()
            .required("filename", FieldType::String, "Relative path to write")
            .required("content", FieldType::String, "Content to write")
    }

    async fn call(&self, args: Value) -> Result<String, ToolError> {
        let filename = args["filename"]
            .as_str()
            .ok_or_else(|| ToolError::execution("filename must be a string"))?;
        let content = args["content"]
            .as_str()
            .ok_or_else(|| ToolError::execution("content must be a string"))?;

        let path = self.resolve(filename)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, content).await?;

        Ok(format!(
            "Successfully wrote {} byte(s) to {filename}",
            content.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_writes_inside_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let tool = WriteFileTool::new(dir.path());

        let result = tool
            .call(json!({"filename": "notes/out.txt", "content": "hi"}))
            .await
            .unwrap();
        assert!(result.contains("out.txt"));

        let written = std::fs::read_to_string(dir.path().join("notes/out.txt")).unwrap();
        assert_eq!(written, "hi");
    }

    #[tokio::test]
    async fn test_rejects_traversal_and_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let tool = WriteFileTool::new(dir.path());

        let err = tool
            .call(json!({"filename": "../escape.txt", "content": "x"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("workspace"));

        let err = tool
            .call(json!({"filename": "/etc/escape.txt", "content": "x"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }
}
