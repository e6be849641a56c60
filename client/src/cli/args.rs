//! CLI argument definitions

use clap::{ArgAction, Parser};

use crate::llm::Provider;

#[derive(Debug, Parser)]
#[command(name = "universal-mcp-client")]
#[command(about = "Chat with OpenAI or Anthropic models that can call MCP tools")]
#[command(version)]
pub struct Cli {
    /// MCP server to launch: a .py script (python), a .js script (node), or an executable
    pub server: String,

    /// LLM provider (default: from .universal-mcp.toml or anthropic)
    #[arg(short, long, value_enum, env = "UNIVERSAL_MCP_PROVIDER")]
    pub provider: Option<Provider>,

    /// Model alias or full model name (default: the provider's default)
    #[arg(short, long, env = "UNIVERSAL_MCP_MODEL")]
    pub model: Option<String>,

    /// Maximum model calls per query
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level used when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose >= 1
    }
}
