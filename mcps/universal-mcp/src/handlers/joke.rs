//! Random jokes via JokeAPI (safe mode, no key required)

use serde::Deserialize;

use super::ToolContext;
use crate::http::endpoint_url;

#[derive(Debug, Deserialize)]
pub struct JokeResponse {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    joke: Option<String>,
    #[serde(default)]
    setup: Option<String>,
    #[serde(default)]
    delivery: Option<String>,
}

pub async fn get_random_joke(ctx: &ToolContext, category: Option<&str>) -> String {
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("Any");

    let mut url = match endpoint_url(&ctx.config.endpoints.jokeapi, &["joke", category]) {
        Ok(url) => url,
        Err(e) => return format!("Error fetching joke: {}", e),
    };
    url.set_query(Some("safe-mode"));

    match ctx.api.get_json::<JokeResponse>(url.as_str(), &[]).await {
        Ok(data) => format_joke(&data),
        Err(e) => format!("Error fetching joke: {}", e),
    }
}

pub fn format_joke(data: &JokeResponse) -> String {
    if data.error {
        return format!(
            "Error: {}",
            data.message.as_deref().unwrap_or("Unknown error")
        );
    }

    if data.kind.as_deref() == Some("single") {
        return data.joke.clone().unwrap_or_default();
    }

    format!(
        "{}\n\n{}",
        data.setup.as_deref().unwrap_or_default(),
        data.delivery.as_deref().unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::unreachable_context;

    fn parse(value: serde_json::Value) -> JokeResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_joke() {
        let data = parse(serde_json::json!({
            "error": false,
            "category": "Programming",
            "type": "single",
            "joke": "There are 10 kinds of people."
        }));
        assert_eq!(format_joke(&data), "There are 10 kinds of people.");
    }

    #[test]
    fn test_twopart_joke() {
        let data = parse(serde_json::json!({
            "error": false,
            "type": "twopart",
            "setup": "Why do programmers prefer dark mode?",
            "delivery": "Because light attracts bugs."
        }));
        assert_eq!(
            format_joke(&data),
            "Why do programmers prefer dark mode?\n\nBecause light attracts bugs."
        );
    }

    #[test]
    fn test_api_error() {
        let data = parse(serde_json::json!({
            "error": true,
            "message": "No matching joke found"
        }));
        assert_eq!(format_joke(&data), "Error: No matching joke found");
    }

    #[tokio::test]
    async fn test_network_failure_placeholder() {
        let ctx = unreachable_context();
        let text = get_random_joke(&ctx, Some("programming")).await;
        assert!(text.starts_with("Error fetching joke: "), "{}", text);
    }
}
