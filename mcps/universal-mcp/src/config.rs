//! Configuration loading for universal-mcp
//!
//! Configuration is loaded from:
//! 1. Environment variable UNIVERSAL_MCP_CONFIG_PATH
//! 2. ~/.universal-mcp/server.toml
//! 3. Default values
//!
//! API keys always come last from the environment (OPENWEATHER_API_KEY,
//! NEWSAPI_KEY, SERPAPI_KEY) and override anything in the file.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const OPENWEATHER_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const NEWSAPI_KEY_VAR: &str = "NEWSAPI_KEY";
pub const SERPAPI_KEY_VAR: &str = "SERPAPI_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    /// Base URLs of the upstream APIs
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub keys: ApiKeys,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_openweather")]
    pub openweather: String,
    #[serde(default = "default_coingecko")]
    pub coingecko: String,
    #[serde(default = "default_newsapi")]
    pub newsapi: String,
    #[serde(default = "default_jokeapi")]
    pub jokeapi: String,
    #[serde(default = "default_serpapi")]
    pub serpapi: String,
    #[serde(default = "default_dictionary")]
    pub dictionary: String,
}

/// Optional API keys; a tool whose key is missing answers with a placeholder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    pub openweather: Option<String>,
    pub newsapi: Option<String>,
    pub serpapi: Option<String>,
}

fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "universal-mcp/0.1".to_string()
}

fn default_openweather() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_coingecko() -> String {
    "https://api.coingecko.com".to_string()
}

fn default_newsapi() -> String {
    "https://newsapi.org".to_string()
}

fn default_jokeapi() -> String {
    "https://v2.jokeapi.dev".to_string()
}

fn default_serpapi() -> String {
    "https://serpapi.com".to_string()
}

fn default_dictionary() -> String {
    "https://api.dictionaryapi.dev".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openweather: default_openweather(),
            coingecko: default_coingecko(),
            newsapi: default_newsapi(),
            jokeapi: default_jokeapi(),
            serpapi: default_serpapi(),
            dictionary: default_dictionary(),
        }
    }
}

impl Endpoints {
    /// Point every endpoint at the same base URL
    pub fn all(base: &str) -> Self {
        Self {
            openweather: base.to_string(),
            coingecko: base.to_string(),
            newsapi: base.to_string(),
            jokeapi: base.to_string(),
            serpapi: base.to_string(),
            dictionary: base.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply env keys
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                Self::load_from_path(&path)?
            }
            Some(_) => {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_env(|var| std::env::var(var).ok());
        Ok(config)
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Override keys from an environment lookup; empty values are ignored
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(OPENWEATHER_KEY_VAR) {
            self.keys.openweather = Some(key);
        }
        if let Some(key) = non_empty(NEWSAPI_KEY_VAR) {
            self.keys.newsapi = Some(key);
        }
        if let Some(key) = non_empty(SERPAPI_KEY_VAR) {
            self.keys.serpapi = Some(key);
        }
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("UNIVERSAL_MCP_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        dirs::home_dir().map(|home| home.join(".universal-mcp").join("server.toml"))
    }
}
