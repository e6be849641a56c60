//! Universal MCP client
//!
//! Launches an MCP server, connects to it, and runs an interactive chat
//! with OpenAI or Anthropic in which the model can call the server's tools.

use anyhow::{Context, Result};
use clap::Parser;

use universal_mcp_client::agent::Agent;
use universal_mcp_client::cli::{Cli, Repl};
use universal_mcp_client::config::ClientConfig;
use universal_mcp_client::llm::{ApiKeys, ProviderFactory, ProviderSession};
use universal_mcp_client::mcp::{McpSession, ServerLaunch};
use universal_mcp_client::output::default_output;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; real environment variables take precedence
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    mcp_common::init_tracing(cli.log_level())?;

    let config = ClientConfig::load()?;

    let provider = cli.provider.unwrap_or(config.llm.provider);
    let model = cli.model.clone().or_else(|| config.llm.model.clone());
    let session = ProviderSession::new(provider, model);

    // Fail on a missing API key before starting the server
    let factory = ProviderFactory::new(config.adapter_settings(), ApiKeys::from_env());
    let adapter = factory.build(&session)?;

    let launch = ServerLaunch::for_path(&cli.server).quiet_child_logs(cli.is_verbose(), rust_log_set);
    let tools = McpSession::connect(&launch)
        .await
        .with_context(|| format!("could not connect to MCP server '{}'", cli.server))?;

    let max_iterations = cli.max_iterations.unwrap_or(config.agent.max_iterations);
    let mut agent = Agent::connect(session, adapter, Box::new(tools))
        .await?
        .with_max_iterations(max_iterations);

    let output = default_output(cli.is_verbose());
    let result = Repl::new(&mut agent, &factory, output.as_ref()).run().await;

    if let Err(e) = agent.shutdown().await {
        tracing::warn!("Error shutting down MCP session: {}", e);
    }

    result
}
