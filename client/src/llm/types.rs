//! Provider-neutral conversation types
//!
//! Both adapters translate to and from these, so the history survives a
//! provider switch unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// A model-issued request to run a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-issued identifier pairing the call with its result
    pub id: String,
    pub name: String,
    /// JSON object for well-formed calls; anything else is kept verbatim
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Arguments as a JSON object, or `None` when the model produced
    /// something that cannot be passed to a tool
    pub fn object_arguments(&self) -> Option<&Map<String, Value>> {
        self.arguments.as_object()
    }
}

/// One entry of the conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    /// The call requested (assistant) or answered (tool)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_call: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_call: None,
        }
    }

    pub fn assistant_tool_call(content: impl Into<String>, call: ToolCall) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_call: Some(call),
        }
    }

    /// Result of `call`; `content` is exactly what the tool returned
    pub fn tool_result(call: ToolCall, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_call: Some(call),
        }
    }

    pub fn is_tool_request(&self) -> bool {
        self.role == Role::Assistant && self.tool_call.is_some()
    }
}

/// A tool as advertised to the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object
    pub input_schema: Value,
}
