//! LLM provider abstraction
//!
//! A [`ProviderAdapter`] turns the shared conversation history into one
//! vendor's wire format, sends it, and turns the answer back into a
//! [`ProviderReply`]. Adapters are built from a [`ProviderSession`] by the
//! [`ProviderFactory`], which is also what the `use` command goes through.

mod anthropic;
mod error;
pub mod models;
mod openai;
mod types;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use anthropic::AnthropicAdapter;
pub use error::ProviderError;
pub use openai::OpenAiAdapter;
pub use types::{ConversationMessage, Role, ToolCall, ToolDescriptor};

/// Supported LLM vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum, Serialize, Deserialize)]
pub enum Provider {
    #[value(name = "openai")]
    #[serde(rename = "openai")]
    OpenAi,
    #[value(name = "anthropic")]
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider '{0}' (expected 'openai' or 'anthropic')")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            _ => Err(UnknownProvider(s.trim().to_string())),
        }
    }
}

/// The provider and model currently answering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    pub provider: Provider,
    /// Model as the user named it (short alias or full identifier)
    pub model: String,
}

impl ProviderSession {
    /// Session with the given model, or the provider's default
    pub fn new(provider: Provider, model: Option<String>) -> Self {
        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| models::default_model(provider).to_string());
        Self { provider, model }
    }

    /// Identifier sent to the API
    pub fn resolved_model(&self) -> String {
        models::resolve_model(self.provider, &self.model)
    }
}

impl fmt::Display for ProviderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.model)
    }
}

/// What the model answered
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    /// Final answer
    Text(String),
    /// One or more tool calls, with any text the model produced alongside
    ToolCalls { text: String, calls: Vec<ToolCall> },
}

impl ProviderReply {
    pub(crate) fn from_parts(text: String, calls: Vec<ToolCall>) -> Self {
        if calls.is_empty() {
            ProviderReply::Text(text)
        } else {
            ProviderReply::ToolCalls { text, calls }
        }
    }
}

/// One LLM vendor behind a common interface
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    /// Full model identifier sent on the wire
    fn model(&self) -> &str;

    /// Send the whole history plus the available tools
    async fn send(
        &self,
        history: &[ConversationMessage],
        tools: &[ToolDescriptor],
    ) -> Result<ProviderReply, ProviderError>;
}

/// Non-secret settings shared by both adapters
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    pub max_tokens: u32,
    pub openai_base_url: String,
    pub anthropic_base_url: String,
    pub system_prompt: Option<String>,
    pub timeout: Duration,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            openai_base_url: "https://api.openai.com".to_string(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            system_prompt: None,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Provider API keys
#[derive(Clone, Default)]
pub struct ApiKeys {
    pub openai: Option<String>,
    pub anthropic: Option<String>,
}

impl ApiKeys {
    /// Read `OPENAI_API_KEY` and `ANTHROPIC_API_KEY`
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            openai: lookup(Provider::OpenAi.api_key_var()),
            anthropic: lookup(Provider::Anthropic.api_key_var()),
        }
    }

    /// Key for `provider`; blank values count as missing
    pub fn get(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::OpenAi => self.openai.as_deref(),
            Provider::Anthropic => self.anthropic.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Builds adapters for a session
#[derive(Clone)]
pub struct ProviderFactory {
    settings: AdapterSettings,
    keys: ApiKeys,
}

impl ProviderFactory {
    pub fn new(settings: AdapterSettings, keys: ApiKeys) -> Self {
        Self { settings, keys }
    }

    pub fn settings(&self) -> &AdapterSettings {
        &self.settings
    }

    /// Fails with `MissingApiKey` when the provider's key is absent
    pub fn build(&self, session: &ProviderSession) -> Result<Box<dyn ProviderAdapter>, ProviderError> {
        let provider = session.provider;
        let api_key = self
            .keys
            .get(provider)
            .ok_or(ProviderError::MissingApiKey {
                provider,
                var: provider.api_key_var(),
            })?
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(self.settings.timeout)
            .build()
            .map_err(ProviderError::network(provider))?;

        let model = session.resolved_model();
        tracing::info!(%provider, %model, "building provider adapter");

        let adapter: Box<dyn ProviderAdapter> = match provider {
            Provider::OpenAi => Box::new(OpenAiAdapter::new(http, api_key, model, &self.settings)),
            Provider::Anthropic => {
                Box::new(AnthropicAdapter::new(http, api_key, model, &self.settings))
            }
        };
        Ok(adapter)
    }
}

/// Send `request` and return the body of a successful response
pub(crate) async fn send_json(
    provider: Provider,
    request: reqwest::RequestBuilder,
) -> Result<String, ProviderError> {
    let response = request.send().await.map_err(ProviderError::network(provider))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(ProviderError::network(provider))?;

    if !status.is_success() {
        tracing::warn!(%provider, status = status.as_u16(), "provider returned an error");
        return Err(ProviderError::from_status(provider, status.as_u16(), &body));
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str_case_insensitive() {
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("ANTHROPIC".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert_eq!(
            "gemini".parse::<Provider>().unwrap_err(),
            UnknownProvider("gemini".to_string())
        );
    }

    #[test]
    fn test_session_defaults() {
        let session = ProviderSession::new(Provider::Anthropic, None);
        assert_eq!(session.model, "claude-3-sonnet");
        assert_eq!(session.resolved_model(), "claude-3-7-sonnet-latest");
        assert_eq!(session.to_string(), "anthropic:claude-3-sonnet");

        let session = ProviderSession::new(Provider::OpenAi, Some("gpt-4".into()));
        assert_eq!(session.resolved_model(), "gpt-4o");
    }

    #[test]
    fn test_reply_from_parts() {
        assert_eq!(
            ProviderReply::from_parts("done".into(), vec![]),
            ProviderReply::Text("done".into())
        );
        let call = ToolCall::new("1", "get_current_time", serde_json::json!({}));
        assert!(matches!(
            ProviderReply::from_parts(String::new(), vec![call]),
            ProviderReply::ToolCalls { calls, .. } if calls.len() == 1
        ));
    }

    #[test]
    fn test_api_keys_blank_is_missing() {
        let keys = ApiKeys::from_lookup(|var| match var {
            "OPENAI_API_KEY" => Some("  ".to_string()),
            "ANTHROPIC_API_KEY" => Some("sk-ant".to_string()),
            _ => None,
        });
        assert_eq!(keys.get(Provider::OpenAi), None);
        assert_eq!(keys.get(Provider::Anthropic), Some("sk-ant"));
    }

    #[test]
    fn test_factory_requires_key() {
        let factory = ProviderFactory::new(AdapterSettings::default(), ApiKeys::default());
        let err = factory
            .build(&ProviderSession::new(Provider::OpenAi, None))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ProviderError::MissingApiKey { provider: Provider::OpenAi, var: "OPENAI_API_KEY" }
        ));
    }

    #[test]
    fn test_factory_builds_resolved_model() {
        let keys = ApiKeys {
            openai: None,
            anthropic: Some("sk-ant".into()),
        };
        let factory = ProviderFactory::new(AdapterSettings::default(), keys);
        let adapter = factory
            .build(&ProviderSession::new(Provider::Anthropic, Some("claude-3-opus".into())))
            .unwrap();
        assert_eq!(adapter.provider(), Provider::Anthropic);
        assert_eq!(adapter.model(), "claude-3-opus-latest");
    }

    #[tokio::test]
    async fn test_built_adapter_unreachable_host() {
        let settings = AdapterSettings {
            openai_base_url: "http://127.0.0.1:1".into(),
            timeout: Duration::from_secs(5),
            ..Default::default()
        };
        let keys = ApiKeys {
            openai: Some("sk-test".into()),
            anthropic: None,
        };
        let adapter = ProviderFactory::new(settings, keys)
            .build(&ProviderSession::new(Provider::OpenAi, None))
            .unwrap();

        let err = adapter
            .send(&[ConversationMessage::user("hi")], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Network { provider: Provider::OpenAi, .. }));
    }
}
