//! In-process execution of MCP servers
//!
//! [`EmbeddableMcp`] lets a host call a server's tools directly, without a
//! child process or stdio framing. The chat client uses it to run the tool
//! server inside its own process, and the tests use it to drive the
//! dispatch loop against real handlers.

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not match the tool's input schema
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// MCP protocol error raised by the tool
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// An MCP server that can be executed in-process
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name, as it would appear in a client's server list
    fn server_name(&self) -> &str;

    /// All tools with name, description and input schema
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute a tool by name with a JSON object of arguments
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    fn server_description(&self) -> Option<&str> {
        None
    }
}

/// Decode tool arguments, reporting schema mismatches as `InvalidParams`
pub fn decode_params<T: serde::de::DeserializeOwned>(params: Value) -> EmbeddableResult<T> {
    // Tools without required fields accept a missing argument object
    let params = if params.is_null() {
        Value::Object(Default::default())
    } else {
        params
    };
    serde_json::from_value(params).map_err(|e| EmbeddableError::InvalidParams(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::text_success;

    struct EchoServer;

    #[async_trait]
    impl EmbeddableMcp for EchoServer {
        fn server_name(&self) -> &str {
            "echo"
        }

        fn list_tools(&self) -> Vec<Tool> {
            vec![]
        }

        async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
            match name {
                "echo" => Ok(text_success(params.to_string())),
                other => Err(EmbeddableError::ToolNotFound(other.to_string())),
            }
        }
    }

    #[derive(Debug, serde::Deserialize)]
    struct WordParams {
        word: String,
        #[serde(default)]
        limit: Option<u32>,
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = EchoServer.call_tool("missing", serde_json::json!({})).await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(name)) if name == "missing"));
    }

    #[tokio::test]
    async fn test_known_tool() {
        let result = EchoServer
            .call_tool("echo", serde_json::json!({"a": 1}))
            .await
            .unwrap();
        assert_eq!(result.content.len(), 1);
        assert!(EchoServer.server_description().is_none());
    }

    #[test]
    fn test_decode_params() {
        let params: WordParams = decode_params(serde_json::json!({"word": "serendipity"})).unwrap();
        assert_eq!(params.word, "serendipity");
        assert_eq!(params.limit, None);
    }

    #[test]
    fn test_decode_params_invalid() {
        let err = decode_params::<WordParams>(serde_json::json!({"limit": 3})).unwrap_err();
        assert!(matches!(err, EmbeddableError::InvalidParams(_)));
    }

    #[test]
    fn test_decode_params_null_is_empty_object() {
        #[derive(serde::Deserialize)]
        struct OptionalOnly {
            #[serde(default)]
            timezone: Option<String>,
        }
        let params: OptionalOnly = decode_params(Value::Null).unwrap();
        assert!(params.timezone.is_none());
    }
}
