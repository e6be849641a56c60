//! Client configuration (`.universal-mcp.toml`)
//!
//! Every field is optional. Command-line flags override the file, and API
//! keys never live here: they come from the environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::agent::DEFAULT_MAX_ITERATIONS;
use crate::llm::{AdapterSettings, Provider};

/// Name of the config file looked up from the working directory
pub const CONFIG_FILE_NAME: &str = ".universal-mcp.toml";

/// Find the config file by walking up from `start`, then in the global
/// config directory (`~/.config/universal-mcp/` on Linux).
fn find_config_file(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }

    let global = dirs::config_dir()?.join("universal-mcp").join(filename);
    global.is_file().then_some(global)
}

/// Top-level client configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub agent: AgentSection,
}

/// `[llm]`: default provider and wire settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmSection {
    #[serde(default = "default_provider")]
    pub provider: Provider,
    /// Model alias or full identifier; the provider default when unset
    pub model: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// `[agent]`: dispatch loop settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSection {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    pub system_prompt: Option<String>,
}

fn default_provider() -> Provider {
    Provider::Anthropic
}

fn default_max_tokens() -> u32 {
    AdapterSettings::default().max_tokens
}

fn default_openai_base_url() -> String {
    AdapterSettings::default().openai_base_url
}

fn default_anthropic_base_url() -> String {
    AdapterSettings::default().anthropic_base_url
}

fn default_timeout_secs() -> u64 {
    AdapterSettings::default().timeout.as_secs()
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            max_tokens: default_max_tokens(),
            openai_base_url: default_openai_base_url(),
            anthropic_base_url: default_anthropic_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            system_prompt: None,
        }
    }
}

impl ClientConfig {
    /// Load the nearest config file, or defaults when there is none
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine working directory")?;
        match find_config_file(&cwd, CONFIG_FILE_NAME) {
            Some(path) => {
                tracing::debug!("Loading config from: {}", path.display());
                Self::load_from_path(&path)
            }
            None => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Settings handed to the provider factory
    pub fn adapter_settings(&self) -> AdapterSettings {
        AdapterSettings {
            max_tokens: self.llm.max_tokens,
            openai_base_url: self.llm.openai_base_url.clone(),
            anthropic_base_url: self.llm.anthropic_base_url.clone(),
            system_prompt: self.agent.system_prompt.clone(),
            timeout: std::time::Duration::from_secs(self.llm.timeout_secs),
        }
    }
}
