//! In-process tool execution through [`EmbeddableMcp`]

use async_trait::async_trait;
use mcp_common::{result_text, EmbeddableError, EmbeddableMcp};
use serde_json::{Map, Value};

use super::{descriptor_from_tool, McpBridgeError, ToolInvoker};
use crate::llm::ToolDescriptor;

/// Runs an embeddable server's tools directly, without a child process
pub struct InProcessTools<S> {
    server: S,
}

impl<S: EmbeddableMcp> InProcessTools<S> {
    pub fn new(server: S) -> Self {
        Self { server }
    }

    pub fn server(&self) -> &S {
        &self.server
    }
}

impl From<EmbeddableError> for McpBridgeError {
    fn from(err: EmbeddableError) -> Self {
        match err {
            EmbeddableError::ToolNotFound(name) => McpBridgeError::ToolNotFound(name),
            other => McpBridgeError::Tool(other.to_string()),
        }
    }
}

#[async_trait]
impl<S: EmbeddableMcp> ToolInvoker for InProcessTools<S> {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, McpBridgeError> {
        Ok(self
            .server
            .list_tools()
            .iter()
            .map(descriptor_from_tool)
            .collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<String, McpBridgeError> {
        tracing::debug!(server = self.server.server_name(), tool = name, "in-process tool call");
        let result = self
            .server
            .call_tool(name, Value::Object(arguments))
            .await?;
        Ok(result_text(&result))
    }
}
