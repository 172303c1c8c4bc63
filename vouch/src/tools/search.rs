//! Knowledge-base search tool.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::retrieval::CorpusIndex;
use crate::schema::{FieldType, InputSchema};
use crate::tool::{Tool, ToolError};

/// Tool that searches a [`CorpusIndex`] and returns the top matches.
///
/// The index is constructed by the caller and shared in; the tool holds a
/// reference, it does not own corpus loading.
#[derive(Debug, Clone)]
pub struct SearchTool {
    index: Arc<CorpusIndex>,
    k: usize,
}

impl SearchTool {
    /// Create a search tool over the given index, returning up to `k` hits.
    #[must_use]
    pub fn new(index: Arc<CorpusIndex>, k: usize) -> Self {
        Self { index, k }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "rag_search"
    }

    fn description(&self) -> &str {
        "Search the knowledge base for information relevant to a query."
    }

    fn schema(&self) -> InputSchema {
        InputSchema::new().required("query", FieldType::String, "What to search for")
    }

    async fn call(&self, args: Value) -> Result<String, ToolError> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| ToolError::execution("query must be a string"))?;

        let hits = self.index.search(query, self.k);
        if hits.is_empty() {
            return Ok("No matching documents found.".to_owned());
        }

        let mut out = String::new();
        for (i, hit) in hits.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("[{:.2}] {}", hit.score, hit.text));
        }
        Ok(out)
    }
}
