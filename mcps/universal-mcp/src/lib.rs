//! Universal MCP Library
//!
//! An MCP server with seven general-purpose tools backed by public HTTP
//! APIs: weather, cryptocurrency prices, news headlines, jokes, web search,
//! word definitions and the current time.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use universal_mcp::{Config, EmbeddableMcp, UniversalMcpServer};
//!
//! let server = UniversalMcpServer::new(Config::load()?)?;
//! let result = server.call_tool("get_current_time", serde_json::json!({})).await?;
//! ```
//!
//! # Usage as Binary
//!
//! Run directly: `universal-mcp` (speaks MCP over stdio)

pub mod config;
pub mod handlers;
pub mod http;
pub mod params;
pub mod server;

pub use config::Config;
pub use server::UniversalMcpServer;

pub use params::{
    CryptoPriceParams, CurrentTimeParams, DefineWordParams, JokeParams, NewsParams,
    WeatherParams, WebSearchParams,
};

// Re-export EmbeddableMcp trait for in-process usage
pub use mcp_common::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
