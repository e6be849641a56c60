//! Bridge between model tool calls and MCP tools
//!
//! [`ToolInvoker`] is what the dispatch loop talks to. [`McpSession`] is the
//! real implementation: one persistent rmcp client connected to a child
//! server over stdio. [`InProcessTools`] runs an [`mcp_common::EmbeddableMcp`]
//! server inside the client process instead.

mod embedded;
mod session;

pub use embedded::InProcessTools;
pub use session::{McpSession, ServerLaunch};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::llm::ToolDescriptor;

/// Failure talking to the tool server. The dispatch loop turns these into
/// placeholder text for the model.
#[derive(Debug, thiserror::Error)]
pub enum McpBridgeError {
    #[error("failed to start MCP server '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("MCP handshake failed: {0}")]
    Handshake(String),

    #[error("MCP session is closed")]
    Disconnected,

    #[error("{0}")]
    Service(#[from] rmcp::ServiceError),

    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("{0}")]
    Tool(String),
}

/// Something that can list and run tools
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// All tools the server advertises
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, McpBridgeError>;

    /// Run one tool and return its text output
    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<String, McpBridgeError>;

    /// Release the connection; later calls fail with `Disconnected`
    async fn shutdown(&self) -> Result<(), McpBridgeError> {
        Ok(())
    }
}

/// Convert an rmcp tool into the descriptor handed to providers
pub(crate) fn descriptor_from_tool(tool: &rmcp::model::Tool) -> ToolDescriptor {
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool
            .description
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default(),
        input_schema: Value::Object(tool.input_schema.as_ref().clone()),
    }
}
