//! Canned weather lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::schema::{FieldType, InputSchema};
use crate::tool::{Tool, ToolError};

/// Mock weather tool with optional per-city overrides.
#[derive(Debug, Clone, Default)]
pub struct WeatherTool {
    conditions: HashMap<String, String>,
}

impl WeatherTool {
    /// Create a weather tool that answers "Sunny, 25°C" for every city.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a canned condition for a specific city (case-insensitive).
    #[must_use]
    pub fn with_condition(mut self, city: impl Into<String>, condition: impl Into<String>) -> Self {
        self.conditions
            .insert(city.into().to_lowercase(), condition.into());
        self
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather for a specific city."
    }

    fn schema(&self) -> InputSchema {
        InputSchema::new().required("city", FieldType::String, "City to look up")
    }

    async fn call(&self, args: Value) -> Result<String, ToolError> {
        let city = args["city"]
            .as_str()
            .ok_or_else(|| ToolError::execution("city must be a string"))?;
        let condition = self
            .conditions
            .get(&city.to_lowercase())
            .map_or("Sunny, 25°C", String::as_str);
        Ok(format!("The weather in {city} is {condition}."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_default_condition() {
        let tool = WeatherTool::new();
        let result = tool.call(json!({"city": "Austin"})).await.unwrap();
        assert_eq!(result, "The weather in Austin is Sunny, 25°C.");
    }

    #[tokio::test]
    async fn test_override_is_case_insensitive() {
        let tool = WeatherTool::new().with_condition("Oslo", "Snowy, -3°C");
        let result = tool.call(json!({"city": "oslo"})).await.unwrap();
        assert!(result.contains("Snowy"));
    }
}
