//! Universal MCP client
//!
//! A chat client that sends each turn to OpenAI or Anthropic, runs the
//! tool calls the model asks for against an MCP server, and feeds the
//! results back until the model answers. The provider can be switched
//! mid-conversation without losing history.
//!
//! - [`llm`]: provider adapters and the shared message model
//! - [`mcp`]: the tool bridge (child-process session or in-process server)
//! - [`agent`]: the dispatch loop
//! - [`cli`], [`output`], [`config`]: the command-line front end

pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod mcp;
pub mod output;

pub use agent::{Agent, AgentError, TurnOutcome, TurnStep};
pub use config::ClientConfig;
pub use llm::{Provider, ProviderFactory, ProviderSession};
pub use mcp::{InProcessTools, McpSession, ServerLaunch, ToolInvoker};
