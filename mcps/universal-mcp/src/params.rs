//! Tool parameter types
//!
//! The JSON schemas the model sees are generated from these structs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WeatherParams {
    #[schemars(description = "City name, e.g. 'London'")]
    pub city: String,
    #[schemars(description = "Optional ISO 3166 country code, e.g. 'GB'")]
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CryptoPriceParams {
    #[schemars(
        description = "Full cryptocurrency name as used by CoinGecko, e.g. 'bitcoin' or 'ethereum'"
    )]
    pub symbol: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct NewsParams {
    #[schemars(description = "Optional topic to filter headlines")]
    #[serde(default)]
    pub topic: Option<String>,
    #[schemars(description = "Two-letter country code (default: 'us')")]
    #[serde(default)]
    pub country: Option<String>,
    #[schemars(description = "Number of headlines to return (default: 5, max: 10)")]
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct JokeParams {
    #[schemars(
        description = "Optional joke category: 'programming', 'misc', 'dark', 'pun', 'spooky' or 'christmas'"
    )]
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    #[schemars(description = "Search query")]
    pub query: String,
    #[schemars(description = "Number of results to return (default: 5, max: 10)")]
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DefineWordParams {
    #[schemars(description = "The English word to define")]
    pub word: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CurrentTimeParams {
    #[schemars(description = "'UTC' (default) or 'local'")]
    #[serde(default)]
    pub timezone: Option<String>,
}
