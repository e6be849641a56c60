//! Cryptocurrency prices via CoinGecko (no key required)

use std::collections::HashMap;

use serde::Deserialize;

use super::ToolContext;

#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    usd: Option<f64>,
    eur: Option<f64>,
    usd_24h_change: Option<f64>,
}

pub async fn get_crypto_price(ctx: &ToolContext, symbol: &str) -> String {
    // CoinGecko ids are lowercase coin names ("bitcoin"), not tickers
    let id = symbol.trim().to_lowercase();

    let url = format!(
        "{}/api/v3/simple/price",
        ctx.config.endpoints.coingecko.trim_end_matches('/')
    );
    let params = [
        ("ids", id.clone()),
        ("vs_currencies", "usd,eur".to_string()),
        ("include_24hr_change", "true".to_string()),
    ];

    match ctx.api.get_json::<HashMap<String, Quote>>(&url, &params).await {
        Ok(prices) => match prices.get(&id) {
            Some(quote) => format_quote(&id, quote),
            None => format!(
                "Cryptocurrency not found: {}. Try using the full name (e.g., 'bitcoin' instead of 'BTC').",
                id
            ),
        },
        Err(e) => format!("Error fetching cryptocurrency data: {}", e),
    }
}

pub fn format_quote(id: &str, quote: &Quote) -> String {
    let or_na = |value: Option<f64>| value.map_or_else(|| "N/A".to_string(), |v| v.to_string());
    let change = quote
        .usd_24h_change
        .map_or_else(|| "N/A".to_string(), |c| format!("{:.2}%", c));

    format!(
        "Current {} price:\n- USD: ${}\n- EUR: €{}\n- 24h Change: {}\n",
        id.to_uppercase(),
        or_na(quote.usd),
        or_na(quote.eur),
        change
    )
}
