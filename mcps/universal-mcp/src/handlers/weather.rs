//! Current weather via OpenWeatherMap

use serde::Deserialize;

use super::{missing_key, ToolContext};
use crate::config::OPENWEATHER_KEY_VAR;
use crate::http::FetchError;

#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    weather: Vec<Condition>,
    main: Readings,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Readings {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

pub async fn get_weather(ctx: &ToolContext, city: &str, country_code: Option<&str>) -> String {
    let Some(api_key) = ctx.config.keys.openweather.as_deref().filter(|k| !k.is_empty()) else {
        return missing_key("OpenWeatherMap API", OPENWEATHER_KEY_VAR);
    };

    let query = match country_code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => format!("{},{}", city, code),
        None => city.to_string(),
    };

    let url = format!(
        "{}/data/2.5/weather",
        ctx.config.endpoints.openweather.trim_end_matches('/')
    );
    let params = [
        ("q", query),
        ("appid", api_key.to_string()),
        ("units", "metric".to_string()),
    ];

    match ctx.api.get_json::<WeatherResponse>(&url, &params).await {
        Ok(data) => format_weather(city, &data),
        Err(e) if e.is_not_found() => format!("City not found: {}", city),
        Err(e @ FetchError::Status { .. }) => format!("Error fetching weather data: {}", e),
        Err(e) => format!("An unexpected error occurred: {}", e),
    }
}

pub fn format_weather(city: &str, data: &WeatherResponse) -> String {
    let conditions = data
        .weather
        .first()
        .map(|c| c.description.as_str())
        .unwrap_or("unknown");

    format!(
        "Weather in {}:\n\
         - Conditions: {}\n\
         - Temperature: {}°C (feels like {}°C)\n\
         - Humidity: {}%\n\
         - Wind Speed: {} m/s\n",
        city,
        conditions,
        data.main.temp,
        data.main.feels_like,
        data.main.humidity,
        data.wind.speed
    )
}
