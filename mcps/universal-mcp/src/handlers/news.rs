//! Top headlines via NewsAPI

use serde::Deserialize;

use super::{missing_key, ToolContext, MAX_RESULTS};
use crate::config::NEWSAPI_KEY_VAR;

#[derive(Debug, Deserialize)]
pub struct NewsResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    source: Option<Source>,
    #[serde(rename = "publishedAt", default)]
    published_at: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Source {
    name: Option<String>,
}

pub async fn get_news_headlines(
    ctx: &ToolContext,
    topic: Option<&str>,
    country: Option<&str>,
    count: Option<usize>,
) -> String {
    let Some(api_key) = ctx.config.keys.newsapi.as_deref().filter(|k| !k.is_empty()) else {
        return missing_key("NewsAPI", NEWSAPI_KEY_VAR);
    };

    let topic = topic.map(str::trim).filter(|t| !t.is_empty());
    let count = count.unwrap_or(5).min(MAX_RESULTS);

    let mut params = vec![
        ("apiKey", api_key.to_string()),
        ("country", country.unwrap_or("us").to_string()),
        ("pageSize", count.to_string()),
    ];
    if let Some(topic) = topic {
        params.push(("q", topic.to_string()));
    }

    let url = format!(
        "{}/v2/top-headlines",
        ctx.config.endpoints.newsapi.trim_end_matches('/')
    );

    match ctx.api.get_json::<NewsResponse>(&url, &params).await {
        Ok(data) => format_headlines(topic, &data),
        Err(e) => format!("Error fetching news data: {}", e),
    }
}

pub fn format_headlines(topic: Option<&str>, data: &NewsResponse) -> String {
    if data.status != "ok" {
        return format!(
            "Error: {}",
            data.message.as_deref().unwrap_or("Unknown error")
        );
    }

    if data.articles.is_empty() {
        return "No news found for the given criteria.".to_string();
    }

    let mut result = format!("Top {} news headlines", data.articles.len());
    if let Some(topic) = topic {
        result.push_str(&format!(" about '{}'", topic));
    }
    result.push_str(":\n\n");

    for (i, article) in data.articles.iter().enumerate() {
        let source = article
            .source
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or("Unknown");
        let title = article.title.as_deref().unwrap_or("No title");

        result.push_str(&format!("{}. {}\n", i + 1, title));
        result.push_str(&format!("   Source: {}\n", source));
        if let Some(date) = article
            .published_at
            .as_deref()
            .and_then(|p| p.split('T').next())
            .filter(|d| !d.is_empty())
        {
            result.push_str(&format!("   Date: {}\n", date));
        }
        if let Some(url) = article.url.as_deref().filter(|u| !u.is_empty()) {
            result.push_str(&format!("   URL: {}\n", url));
        }
        result.push('\n');
    }

    result.trim().to_string()
}
