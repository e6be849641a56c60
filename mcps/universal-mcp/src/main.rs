//! Universal MCP Server
//!
//! Serves the universal tools over stdio. API keys are read from the
//! environment, optionally seeded from a `.env` file in the working
//! directory.

use rmcp::ServiceExt;
use universal_mcp::{Config, UniversalMcpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables take precedence
    dotenvy::dotenv().ok();

    mcp_common::init_tracing("universal_mcp=info")?;

    tracing::info!("Starting universal MCP Server");

    let config = Config::load()?;
    let server = UniversalMcpServer::new(config)?;
    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
