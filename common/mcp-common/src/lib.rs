//! MCP Common - utilities shared by the universal MCP server and client
//!
//! - **Initialization**: [`init_tracing`] writes logs to stderr, text or JSON
//! - **Results**: [`text_success`] builds tool results, [`result_text`]
//!   flattens them back into the string the model sees
//! - **Embeddable**: [`EmbeddableMcp`] for in-process tool execution

pub mod embeddable;
pub mod init;
pub mod result;

pub use embeddable::{decode_params, EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use init::{init_tracing, LogFormat};
pub use result::{result_text, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
