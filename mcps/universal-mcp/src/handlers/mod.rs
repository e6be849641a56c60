//! Tool handler implementations
//!
//! Each handler makes one outbound request and always returns text. Failures
//! (missing key, network error, bad status, unexpected body) become a
//! readable placeholder so the chat session keeps going.

pub mod crypto;
pub mod dictionary;
pub mod joke;
pub mod news;
pub mod search;
pub mod time;
pub mod weather;

use crate::config::Config;
use crate::http::ApiClient;

/// Everything a handler needs: the HTTP client and the loaded config
#[derive(Clone)]
pub struct ToolContext {
    pub api: ApiClient,
    pub config: Config,
}

impl ToolContext {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let api = ApiClient::new(&config.http)?;
        Ok(Self { api, config })
    }
}

/// Placeholder for a tool whose API key is not configured.
/// `service` is the label shown to the user, e.g. "SerpAPI".
pub(crate) fn missing_key(service: &str, var: &str) -> String {
    format!(
        "Error: {} key not configured. Please set {} environment variable.",
        service, var
    )
}

/// Upper bound for result counts accepted from the model
pub(crate) const MAX_RESULTS: usize = 10;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::Endpoints;

    /// Context whose endpoints all refuse connections
    pub fn unreachable_context() -> ToolContext {
        let mut config = Config::default();
        config.endpoints = Endpoints::all("http://127.0.0.1:1");
        config.http.timeout_seconds = 5;
        ToolContext::new(config).unwrap()
    }
}
