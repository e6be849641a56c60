//! Persistent MCP session over a child process's stdio

use std::path::Path;

use async_trait::async_trait;
use rmcp::{
    model::CallToolRequestParam, service::RunningService, transport::TokioChildProcess,
    RoleClient, ServiceExt,
};
use serde_json::{Map, Value};
use tokio::process::Command;
use tokio::sync::Mutex;

use super::{descriptor_from_tool, McpBridgeError, ToolInvoker};
use crate::llm::ToolDescriptor;

/// How to start the tool server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLaunch {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl ServerLaunch {
    /// `.py` scripts run under `python`, `.js` under `node`; anything
    /// else is executed directly
    pub fn for_path(path: &str) -> Self {
        let interpreter = match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("py") => Some("python"),
            Some("js") => Some("node"),
            _ => None,
        };

        match interpreter {
            Some(program) => Self {
                program: program.to_string(),
                args: vec![path.to_string()],
                env: Vec::new(),
            },
            None => Self {
                program: path.to_string(),
                args: Vec::new(),
                env: Vec::new(),
            },
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Keep the child's stderr logging out of the conversation unless
    /// running verbose or the user set `RUST_LOG` themselves
    pub fn quiet_child_logs(self, verbose: bool, rust_log_set: bool) -> Self {
        if verbose || rust_log_set {
            self
        } else {
            self.with_env("RUST_LOG", "warn")
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

/// One rmcp client service kept open for the whole chat session
pub struct McpSession {
    service: Mutex<Option<RunningService<RoleClient, ()>>>,
}

impl McpSession {
    /// Spawn the server and complete the MCP handshake
    pub async fn connect(launch: &ServerLaunch) -> Result<Self, McpBridgeError> {
        tracing::info!(program = %launch.program, args = ?launch.args, "starting MCP server");

        let transport =
            TokioChildProcess::new(launch.command()).map_err(|source| McpBridgeError::Launch {
                program: launch.program.clone(),
                source,
            })?;

        let service = ()
            .serve(transport)
            .await
            .map_err(|e| McpBridgeError::Handshake(e.to_string()))?;

        tracing::info!("MCP server connected");

        Ok(Self {
            service: Mutex::new(Some(service)),
        })
    }
}

#[async_trait]
impl ToolInvoker for McpSession {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, McpBridgeError> {
        let guard = self.service.lock().await;
        let service = guard.as_ref().ok_or(McpBridgeError::Disconnected)?;

        let response = service.list_tools(Default::default()).await?;
        let tools: Vec<ToolDescriptor> = response.tools.iter().map(descriptor_from_tool).collect();

        tracing::info!("{} tools discovered", tools.len());
        Ok(tools)
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<String, McpBridgeError> {
        let guard = self.service.lock().await;
        let service = guard.as_ref().ok_or(McpBridgeError::Disconnected)?;

        let result = service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments: Some(arguments),
                task: None,
            })
            .await?;

        if result.is_error == Some(true) {
            tracing::warn!(tool = name, "tool reported an error result");
        }

        Ok(mcp_common::result_text(&result))
    }

    async fn shutdown(&self) -> Result<(), McpBridgeError> {
        if let Some(service) = self.service.lock().await.take() {
            tracing::info!("Stopping MCP server");
            if let Err(e) = service.cancel().await {
                tracing::warn!("Error canceling MCP server: {}", e);
            }
        }
        Ok(())
    }
}
