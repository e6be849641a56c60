//! Anthropic Messages API adapter

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{
    send_json, AdapterSettings, ConversationMessage, Provider, ProviderAdapter, ProviderError,
    ProviderReply, Role, ToolCall, ToolDescriptor,
};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Sent in place of an assistant turn that had no text
const EMPTY_ANSWER: &str = "(no response)";

pub struct AnthropicAdapter {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    system_prompt: Option<String>,
}

impl AnthropicAdapter {
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
            base_url: settings.anthropic_base_url.trim_end_matches('/').to_string(),
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
impl ProviderAdapter for AnthropicAdapter {
    fn provider(&self) -> Provider {
        Provider::Anthropic
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
            "anthropic request"
        );

        let request = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let text = send_json(Provider::Anthropic, request).await?;
        parse_response(&text)
    }
}

/// Build the Messages API request body.
///
/// Consecutive history entries that map to the same wire role are merged
/// into one message, since tool results travel as user-role content blocks
/// and must directly follow the assistant turn that requested them.
fn build_request_body(
    model: &str,
    max_tokens: u32,
    system_prompt: Option<&str>,
    history: &[ConversationMessage],
    tools: &[ToolDescriptor],
) -> Value {
    let mut messages: Vec<(&'static str, Vec<Value>)> = Vec::new();

    for msg in history {
        let (role, blocks) = encode_message(msg);
        if blocks.is_empty() {
            continue;
        }
        if let Some((last_role, last_blocks)) = messages.last_mut() {
            if *last_role == role {
                last_blocks.extend(blocks);
                continue;
            }
        }
        messages.push((role, blocks));
    }

    let messages: Vec<Value> = messages
        .into_iter()
        .map(|(role, content)| json!({"role": role, "content": content}))
        .collect();

    let mut body = json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": messages,
    });

    if let Some(system) = system_prompt {
        body["system"] = json!(system);
    }

    if !tools.is_empty() {
        let tool_defs: Vec<Value> = tools
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "input_schema": tool.input_schema,
                })
            })
            .collect();
        body["tools"] = Value::Array(tool_defs);
    }

    body
}

fn encode_message(msg: &ConversationMessage) -> (&'static str, Vec<Value>) {
    let mut blocks = Vec::new();

    match msg.role {
        Role::User => {
            push_text(&mut blocks, &msg.content);
            ("user", blocks)
        }
        Role::Assistant => {
            push_text(&mut blocks, &msg.content);
            // An empty answer still has to separate the user turns around it
            if msg.content.is_empty() && msg.tool_call.is_none() {
                push_text(&mut blocks, EMPTY_ANSWER);
            }
            if let Some(call) = &msg.tool_call {
                let input = match &call.arguments {
                    Value::Object(_) => call.arguments.clone(),
                    _ => json!({}),
                };
                blocks.push(json!({
                    "type": "tool_use",
                    "id": call.id,
                    "name": call.name,
                    "input": input,
                }));
            }
            ("assistant", blocks)
        }
        Role::Tool => {
            let id = msg
                .tool_call
                .as_ref()
                .map(|c| c.id.as_str())
                .unwrap_or_default();
            blocks.push(json!({
                "type": "tool_result",
                "tool_use_id": id,
                "content": msg.content,
            }));
            ("user", blocks)
        }
    }
}

/// The API rejects empty text blocks
fn push_text(blocks: &mut Vec<Value>, text: &str) {
    if !text.is_empty() {
        blocks.push(json!({"type": "text", "text": text}));
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Other,
}

/// Parse a Messages API response body
pub(crate) fn parse_response(body: &str) -> Result<ProviderReply, ProviderError> {
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::parse(Provider::Anthropic, e))?;

    let mut texts = Vec::new();
    let mut calls = Vec::new();

    for block in response.content {
        match block {
            ContentBlock::Text { text } => texts.push(text),
            ContentBlock::ToolUse { id, name, input } => {
                calls.push(ToolCall::new(id, name, input))
            }
            ContentBlock::Other => {}
        }
    }

    Ok(ProviderReply::from_parts(texts.join("\n"), calls))
}
