//! OpenAI chat completions adapter

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    send_json, AdapterSettings, ConversationMessage, Provider, ProviderAdapter, ProviderError,
    ProviderReply, Role, ToolCall, ToolDescriptor,
};

pub struct OpenAiAdapter {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    system_prompt: Option<String>,
}

impl OpenAiAdapter {
    pub fn new(
        http: reqwest::Client,
        api_key: String,
        model: String,
        settings: &AdapterSettings,
    ) -> Self {
        Self {
            http,
            api_key,
            model,
            base_url: settings.openai_base_url.trim_end_matches('/').to_string(),
            max_tokens: settings.max_tokens,
            system_prompt: settings.system_prompt.clone(),
        }
    }

    /// JSON body that `send` would post for this history
    pub fn request_body(&self, history: &[ConversationMessage], tools: &[ToolDescriptor]) -> Value {
        build_request_body(
            &self.model,
            self.max_tokens,
            self.system_prompt.as_deref(),
            history,
            tools,
        )
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn send(
        &self,
        history: &[ConversationMessage],
        tools: &[ToolDescriptor],
    ) -> Result<ProviderReply, ProviderError> {
        let body = self.request_body(history, tools);

        tracing::debug!(
            model = %self.model,
            messages = history.len(),
            tools = tools.len(),
            "openai request"
        );

        let request = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        let text = send_json(Provider::OpenAi, request).await?;
        parse_response(&text)
    }
}

/// Build the chat completions request body
fn build_request_body(
    model: &str,
    max_tokens: u32,
    system_prompt: Option<&str>,
    history: &[ConversationMessage],
    tools: &[ToolDescriptor],
) -> Value {
    let mut messages = Vec::with_capacity(history.len() + 1);

    if let Some(system) = system_prompt {
        messages.push(json!({"role": "system", "content": system}));
    }

    let mut iter = history.iter().peekable();
    while let Some(msg) = iter.next() {
        match (msg.role, &msg.tool_call) {
            (Role::User, _) => {
                messages.push(json!({"role": "user", "content": msg.content}));
            }
            (Role::Assistant, Some(call)) => {
                // Consecutive tool requests came from one model response
                let mut calls = vec![encode_tool_call(call)];
                while let Some(next) = iter.next_if(|m| m.is_tool_request()) {
                    if let Some(call) = &next.tool_call {
                        calls.push(encode_tool_call(call));
                    }
                }

                let content = if msg.content.is_empty() {
                    Value::Null
                } else {
                    Value::String(msg.content.clone())
                };
                messages.push(json!({
                    "role": "assistant",
                    "content": content,
                    "tool_calls": calls,
                }));
            }
            (Role::Assistant, None) => {
                messages.push(json!({"role": "assistant", "content": msg.content}));
            }
            (Role::Tool, call) => {
                let id = call.as_ref().map(|c| c.id.as_str()).unwrap_or_default();
                messages.push(json!({
                    "role": "tool",
                    "tool_call_id": id,
                    "content": msg.content,
                }));
            }
        }
    }

    let mut body = json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": messages,
    });

    if !tools.is_empty() {
        let tool_defs: Vec<Value> = tools
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name,
                        "description": tool.description,
                        "parameters": tool.input_schema,
                    }
                })
            })
            .collect();
        body["tools"] = Value::Array(tool_defs);
    }

    body
}

fn encode_tool_call(call: &ToolCall) -> Value {
    // Malformed arguments are echoed back exactly as the model sent them
    let arguments = match &call.arguments {
        Value::String(raw) => raw.clone(),
        other => other.to_string(),
    };

    json!({
        "id": call.id,
        "type": "function",
        "function": {"name": call.name, "arguments": arguments},
    })
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
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

/// Parse a chat completions response body
pub(crate) fn parse_response(body: &str) -> Result<ProviderReply, ProviderError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::parse(Provider::OpenAi, e))?;

    let message = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::parse(Provider::OpenAi, "response has no choices"))?
        .message;

    let calls = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| {
            let arguments = parse_arguments(&tc.function.arguments);
            ToolCall::new(tc.id, tc.function.name, arguments)
        })
        .collect();

    Ok(ProviderReply::from_parts(
        message.content.unwrap_or_default(),
        calls,
    ))
}

/// Decode the JSON-encoded argument string. Anything that is not a JSON
/// object is kept as the raw string.
fn parse_arguments(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return json!({});
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => value,
        _ => Value::String(raw.to_string()),
    }
}
