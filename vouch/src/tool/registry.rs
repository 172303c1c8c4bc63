//! Tool registry: name resolution, schema validation, dispatch.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::InputSchema;
use crate::tool::{BoxedTool, Tool, ToolDefinition};

/// A named collection of tools.
///
/// Schemas are captured once at registration, so `invoke` validates against
/// a fixed validator set instead of rebuilding anything per call.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, RegisteredTool>,
}

struct RegisteredTool {
    tool: BoxedTool,
    schema: InputSchema,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTool`] if a tool with the same name is
    /// already registered.
    pub fn register(&mut self, tool: impl Tool + 'static) -> Result<()> {
        let name = tool.name().to_owned();
        if self.tools.contains_key(&name) {
            return Err(Error::DuplicateTool(name));
        }
        let schema = tool.schema();
        debug!(tool = %name, fields = schema.len(), "registered tool");
        self.tools.insert(
            name,
            RegisteredTool {
                tool: Box::new(tool),
                schema,
            },
        );
        Ok(())
    }

    /// Look up a tool, validate arguments, and run the handler.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownTool`] if no tool has this name.
    /// - [`Error::InvalidArguments`] if `args` fail the tool's schema.
    /// - [`Error::ToolExecution`] wrapping any handler failure.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<String> {
        let entry = self
            .tools
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_owned()))?;

        entry
            .schema
            .validate(&args)
            .map_err(|reason| Error::invalid_arguments(name, reason))?;

        entry
            .tool
            .call(args)
            .await
            .map_err(|source| Error::ToolExecution {
                tool: name.to_owned(),
                source,
            })
    }

    /// Whether a tool with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Names of all registered tools, in stable order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Provider-facing definitions for every registered tool.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|entry| ToolDefinition {
                name: entry.tool.name().to_owned(),
                description: entry.tool.description().to_owned(),
                parameters: entry.schema.to_json_value(),
            })
            .collect()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use async_trait::async_trait;
    use serde_json::json;

    struct Adder;

    #[async_trait]
    impl Tool for Adder {
        fn name(&self) -> &str {
            "add"
        }

        fn description(&self) -> &str {
            "Add x and y together"
        }

        fn schema(&self) -> InputSchema {
            InputSchema::new()
                .required("x", FieldType::Integer, "First addend")
                .required("y", FieldType::Integer, "Second addend")
        }

        async fn call(&self, args: Value) -> std::result::Result<String, crate::tool::ToolError> {
            let x = args["x"].as_i64().unwrap_or_default();
            let y = args["y"].as_i64().unwrap_or_default();
            Ok((x + y).to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl Tool for Failing {
        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn schema(&self) -> InputSchema {
            InputSchema::new()
        }

        async fn call(&self, _args: Value) -> std::result::Result<String, crate::tool::ToolError> {
            Err(crate::tool::ToolError::execution("deliberate failure"))
        }
    }

    #[tokio::test]
    async fn test_register_and_invoke() {
        let mut registry = ToolRegistry::new();
        registry.register(Adder).unwrap();

        let result = registry.invoke("add", json!({"x": 2, "y": 3})).await;
        assert_eq!(result.unwrap(), "5");
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let mut registry = ToolRegistry::new();
        registry.register(Adder).unwrap();
        let err = registry.register(Adder).unwrap_err();
        assert!(matches!(err, Error::DuplicateTool(name) if name == "add"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, Error::UnknownTool(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_argument_validation() {
        let mut registry = ToolRegistry::new();
        registry.register(Adder).unwrap();

        let err = registry.invoke("add", json!({"x": 2})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { .. }));

        let err = registry
            .invoke("add", json!({"x": 2, "y": "three"}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_handler_failure_is_wrapped() {
        let mut registry = ToolRegistry::new();
        registry.register(Failing).unwrap();

        let err = registry.invoke("broken", json!({})).await.unwrap_err();
        match err {
            Error::ToolExecution { tool, source } => {
                assert_eq!(tool, "broken");
                assert!(source.to_string().contains("deliberate failure"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_definitions() {
        let mut registry = ToolRegistry::new();
        registry.register(Adder).unwrap();

        let defs = registry.definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "add");
        assert_eq!(defs[0].parameters["required"], json!(["x", "y"]));
    }
}
