//! Chat-completions HTTP provider.
//!
//! A minimal client for OpenAI's chat-completions API and compatible
//! endpoints (local proxies, gateways). Only the subset the agent loop
//! needs: messages in, one choice with optional tool calls out.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::message::{Message, ToolCall};
use crate::provider::{ModelProvider, ModelTurn};
use crate::tool::ToolDefinition;

/// Default API base URL.
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completions API provider.
#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl OpenAiProvider {
    /// Create a provider for `model` with the given API key and the default
    /// base URL.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_API_BASE_URL.to_owned(),
            model: model.into(),
        }
    }

    /// Override the base URL (local proxies, compatible gateways).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(2);
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn encode_messages(instructions: &str, history: &[Message]) -> Vec<WireMessage> {
        let mut wire = Vec::with_capacity(history.len() + 1);
        if !instructions.is_empty() {
            wire.push(WireMessage {
                role: "system",
                content: Some(instructions.to_owned()),
                tool_calls: None,
                tool_call_id: None,
            });
        }

        for message in history {
            match message {
                Message::User { text } => wire.push(WireMessage {
                    role: "user",
                    content: Some(text.clone()),
                    tool_calls: None,
                    tool_call_id: None,
                }),
                Message::Assistant { text, tool_calls } => wire.push(WireMessage {
                    role: "assistant",
                    content: (!text.is_empty()).then(|| text.clone()),
                    tool_calls: (!tool_calls.is_empty())
                        .then(|| tool_calls.iter().map(WireToolCall::from).collect()),
                    tool_call_id: None,
                }),
                Message::Tool {
                    call_id, content, ..
                } => wire.push(WireMessage {
                    role: "tool",
                    content: Some(content.clone()),
                    tool_calls: None,
                    tool_call_id: Some(call_id.clone()),
                }),
            }
        }

        wire
    }

    fn encode_tools(tools: &[ToolDefinition]) -> Vec<Value> {
        tools
            .iter()
            .map(|def| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": def.name,
                        "description": def.description,
                        "parameters": def.parameters,
                    }
                })
            })
            .collect()
    }

    fn decode_turn(response: ChatResponse) -> Result<ModelTurn> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::provider("response contained no choices"))?;

        let text = choice.message.content.unwrap_or_default();
        let mut tool_calls = Vec::new();

        for call in choice.message.tool_calls.unwrap_or_default() {
            // Arguments arrive as a JSON-encoded string.
            let arguments: Value = serde_json::from_str(&call.function.arguments)
                .map_err(|e| Error::provider(format!("malformed tool arguments: {e}")))?;
            let id = call
                .id
                .unwrap_or_else(|| format!("call_{}", Uuid::new_v4().simple()));
            tool_calls.push(ToolCall::new(id, call.function.name, arguments));
        }

        Ok(ModelTurn { text, tool_calls })
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    async fn complete(
        &self,
        instructions: &str,
        history: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelTurn> {
        let request = ChatRequest {
            model: &self.model,
            messages: Self::encode_messages(instructions, history),
            tools: (!tools.is_empty()).then(|| Self::encode_tools(tools)),
        };

        debug!(model = %self.model, messages = request.messages.len(), "chat request");

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .headers(self.auth_headers())
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::provider(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::provider(format!("HTTP {status}: {body}")));
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("malformed response: {e}")))?;

        Self::decode_turn(decoded)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    arguments: String,
}

impl From<&ToolCall> for WireToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            kind: "function",
            function: WireFunction {
                name: call.name.clone(),
                arguments: call.arguments.to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ResponseToolCall {
    id: Option<String>,
    function: ResponseFunction,
}

#[derive(Debug, Deserialize)]
struct ResponseFunction {
    name: String,
    arguments: String,
}
