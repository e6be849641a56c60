//! Provider errors

use super::Provider;

/// Longest API error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// Failure of a single provider call. Every variant names the provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider}: API key not configured. Please set {var}.")]
    MissingApiKey {
        provider: Provider,
        var: &'static str,
    },

    #[error("{provider}: network error: {source}")]
    Network {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: API error {status}: {body}")]
    Api {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("{provider}: rate limited: {body}")]
    RateLimited { provider: Provider, body: String },

    #[error("{provider}: could not parse response: {message}")]
    Parse { provider: Provider, message: String },
}

impl ProviderError {
    pub fn provider(&self) -> Provider {
        match self {
            ProviderError::MissingApiKey { provider, .. }
            | ProviderError::Network { provider, .. }
            | ProviderError::Api { provider, .. }
            | ProviderError::RateLimited { provider, .. }
            | ProviderError::Parse { provider, .. } => *provider,
        }
    }

    /// Classify a non-success HTTP response
    pub fn from_status(provider: Provider, status: u16, body: &str) -> Self {
        let body = truncate(body);
        if status == 429 {
            ProviderError::RateLimited { provider, body }
        } else {
            ProviderError::Api {
                provider,
                status,
                body,
            }
        }
    }

    pub(crate) fn network(provider: Provider) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| ProviderError::Network { provider, source }
    }

    pub(crate) fn parse(provider: Provider, message: impl ToString) -> Self {
        ProviderError::Parse {
            provider,
            message: message.to_string(),
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_rate_limited() {
        let err = ProviderError::from_status(Provider::OpenAi, 429, "slow down");
        assert!(matches!(err, ProviderError::RateLimited { .. }));
        assert_eq!(err.to_string(), "openai: rate limited: slow down");
    }

    #[test]
    fn test_from_status_truncates_body() {
        let body = "x".repeat(500);
        let err = ProviderError::from_status(Provider::Anthropic, 500, &body);
        match err {
            ProviderError::Api { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), MAX_ERROR_BODY);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_message() {
        let err = ProviderError::MissingApiKey {
            provider: Provider::Anthropic,
            var: "ANTHROPIC_API_KEY",
        };
        assert_eq!(err.provider(), Provider::Anthropic);
        assert_eq!(
            err.to_string(),
            "anthropic: API key not configured. Please set ANTHROPIC_API_KEY."
        );
    }
}
