//! Plain-text rendering of lookup results.

use chrono::{NaiveDate, NaiveDateTime};
use weatherism_core::{ForecastBundle, Location, LookupState, description, icon_name};

/// Timestamp layouts the forecast API has been seen to use.
const TIME_FORMATS: [&str; 4] =
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];

/// "HH:MM" for a forecast timestamp, or "?" if it cannot be parsed.
pub fn hour_label(time: &str) -> String {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(time, format).ok())
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// "Mon 2024-01-01", falling back to the raw string.
fn day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| format!("{} {}", d.format("%a"), date))
        .unwrap_or_else(|_| date.to_string())
}

/// Temperatures are shown as whole degrees, truncated toward zero.
fn whole_degrees(value: f64) -> i64 {
    value.trunc() as i64
}

pub fn render_weather(location: &Location, bundle: &ForecastBundle, hourly_limit: usize) -> String {
    let current = &bundle.current;
    let code = current.weather_code;

    let mut lines = vec![
        location.display_name(),
        format!("{} [{}] ({})", description(code), icon_name(code), current.condition()),
        format!(
            "{}°C  Feels like {}°C",
            whole_degrees(current.temperature_c),
            whole_degrees(current.apparent_temperature_c)
        ),
        String::new(),
        "Hourly".to_string(),
    ];

    lines.extend(
        bundle
            .hourly
            .hours()
            .take(hourly_limit)
            .map(|(time, temp)| format!("  {}  {}°", hour_label(time), whole_degrees(temp))),
    );

    let (min, max) = bundle.daily.today().map_or((0.0, 0.0), |(_, max, min)| (min, max));
    lines.push(String::new());
    lines.push(format!(
        "Min {}°C  Max {}°C  Humidity {}%  Wind {:.1} km/h from {}°",
        whole_degrees(min),
        whole_degrees(max),
        current.relative_humidity_pct,
        current.wind_speed_kmh,
        whole_degrees(current.wind_direction_deg),
    ));

    lines.push(String::new());
    lines.push("Daily".to_string());
    lines.extend(bundle.daily.days().map(|(date, max, min)| {
        format!("  {}  {}° / {}°", day_label(date), whole_degrees(max), whole_degrees(min))
    }));

    lines.join("\n")
}

pub fn render_state(state: &LookupState, hourly_limit: usize) -> String {
    match state {
        LookupState::Idle => "No search yet.".to_string(),
        LookupState::Loading => "Loading...".to_string(),
        LookupState::Success { location, bundle } => render_weather(location, bundle, hourly_limit),
        LookupState::Failed(message) => format!("Error: {message}"),
    }
}
