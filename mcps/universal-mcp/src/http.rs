//! Shared HTTP client for the upstream APIs
//!
//! Every tool makes exactly one GET through [`ApiClient::get_json`]. Errors
//! are typed so handlers can turn specific statuses (404) into their own
//! placeholder text.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::HttpConfig;

/// Failure of a single upstream request
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or body read failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Body was not the JSON shape we expected
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status code, when the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// HTTP client with configured timeout and user agent
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` with query parameters and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Join a base URL and path segments, percent-encoding each segment
pub fn endpoint_url(base: &str, segments: &[&str]) -> Result<url::Url, url::ParseError> {
    let mut url = url::Url::parse(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_segments() {
        let url = endpoint_url("https://api.dictionaryapi.dev", &["api", "v2", "entries", "en", "ice cream"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let url = endpoint_url("http://localhost:9000/mock/", &["joke", "Any"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/mock/joke/Any");
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        assert!(endpoint_url("not a url", &["x"]).is_err());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = ApiClient::new(&HttpConfig::default()).unwrap();
        let err = client
            .get_json::<serde_json::Value>("http://127.0.0.1:1/unreachable", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(!err.is_not_found());
    }
}
