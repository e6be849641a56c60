//! Dispatch loop state, turn results and errors

use std::fmt;

use serde_json::Value;

use crate::llm::ProviderError;
use crate::mcp::McpBridgeError;

/// Where the loop is within a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchState {
    AwaitingUser,
    CallingModel { iteration: usize },
    InvokingTool { name: String },
    FinalAnswer,
}

/// One visible step of a turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnStep {
    /// Text the model produced alongside tool calls
    Text(String),
    ToolCall { name: String, arguments: Value },
    ToolResult { name: String, output: String },
}

impl fmt::Display for TurnStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnStep::Text(text) => f.write_str(text),
            TurnStep::ToolCall { name, arguments } => {
                write!(f, "[Calling tool {} with args {}]", name, arguments)
            }
            TurnStep::ToolResult { output, .. } => write!(f, "[Tool result: {}]", output),
        }
    }
}

/// Result of one user turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// The model's final text
    pub answer: String,
    pub steps: Vec<TurnStep>,
    /// Number of model calls made
    pub iterations: usize,
    pub hit_iteration_limit: bool,
}

impl TurnOutcome {
    /// Steps followed by the answer, one per line
    pub fn transcript(&self) -> String {
        self.steps
            .iter()
            .map(ToString::to_string)
            .chain(std::iter::once(self.answer.clone()))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Errors that end a turn (or prevent the agent from starting)
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("failed to load tools: {0}")]
    Tools(#[from] McpBridgeError),
}
