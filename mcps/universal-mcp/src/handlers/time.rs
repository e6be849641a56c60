//! Current date and time (no network)

use chrono::{DateTime, Local, Utc};

/// Only "local" (any case) selects local time; every other value means UTC
pub fn get_current_time(timezone: Option<&str>) -> String {
    format_time(timezone.unwrap_or("UTC"), Utc::now())
}

pub fn format_time(timezone: &str, now: DateTime<Utc>) -> String {
    let time_str = if timezone.trim().eq_ignore_ascii_case("local") {
        now.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S (Local Time)")
            .to_string()
    } else {
        now.format("%Y-%m-%d %H:%M:%S (UTC)").to_string()
    };

    format!("Current time: {}", time_str)
}
