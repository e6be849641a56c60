//! Web search via SerpAPI (Google engine)

use serde::Deserialize;

use super::{missing_key, ToolContext, MAX_RESULTS};
use crate::config::SERPAPI_KEY_VAR;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

pub async fn web_search(ctx: &ToolContext, query: &str, count: Option<usize>) -> String {
    let Some(api_key) = ctx.config.keys.serpapi.as_deref().filter(|k| !k.is_empty()) else {
        return missing_key("SerpAPI", SERPAPI_KEY_VAR);
    };

    let count = count.unwrap_or(5).min(MAX_RESULTS);
    let params = [
        ("api_key", api_key.to_string()),
        ("q", query.to_string()),
        ("num", count.to_string()),
        ("engine", "google".to_string()),
    ];

    let url = format!(
        "{}/search",
        ctx.config.endpoints.serpapi.trim_end_matches('/')
    );

    match ctx.api.get_json::<SearchResponse>(&url, &params).await {
        Ok(data) => format_results(query, count, &data),
        Err(e) => format!("Error performing web search: {}", e),
    }
}

pub fn format_results(query: &str, count: usize, data: &SearchResponse) -> String {
    if let Some(error) = &data.error {
        return format!("Error: {}", error);
    }

    if data.organic_results.is_empty() {
        return "No search results found.".to_string();
    }

    let mut result = format!("Search results for '{}':\n\n", query);
    for (i, item) in data.organic_results.iter().take(count).enumerate() {
        result.push_str(&format!(
            "{}. {}\n",
            i + 1,
            item.title.as_deref().unwrap_or("No title")
        ));
        if let Some(snippet) = item.snippet.as_deref().filter(|s| !s.is_empty()) {
            result.push_str(&format!("   {}\n", snippet));
        }
        if let Some(link) = item.link.as_deref().filter(|l| !l.is_empty()) {
            result.push_str(&format!("   URL: {}\n", link));
        }
        result.push('\n');
    }

    result.trim().to_string()
}
