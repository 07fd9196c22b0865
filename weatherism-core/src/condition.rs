//! Weather code classification.
//!
//! Open-Meteo reports WMO weather codes; see
//! <https://open-meteo.com/en/docs#weathervariables>. All functions here are total:
//! unknown codes fall back to clear skies rather than failing.

use serde::{Deserialize, Serialize};

/// Coarse condition used to drive presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Foggy,
    Drizzle,
    Rainy,
    Snowy,
    Stormy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 8] = [
        WeatherCondition::Clear,
        WeatherCondition::PartlyCloudy,
        WeatherCondition::Cloudy,
        WeatherCondition::Foggy,
        WeatherCondition::Drizzle,
        WeatherCondition::Rainy,
        WeatherCondition::Snowy,
        WeatherCondition::Stormy,
    ];

    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Foggy,
            51 | 53 | 55 | 56 | 57 => Self::Drizzle,
            61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => Self::Rainy,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snowy,
            95 | 96 | 99 => Self::Stormy,
            _ => Self::Clear,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Foggy => "Foggy",
            Self::Drizzle => "Drizzle",
            Self::Rainy => "Rainy",
            Self::Snowy => "Snowy",
            Self::Stormy => "Stormy",
        }
    }

    /// Background gradient stops as `(colour, opacity)`, top-leading to bottom-trailing.
    pub fn gradient(&self) -> [(&'static str, f32); 3] {
        match self {
            Self::Clear => [("orange", 0.8), ("yellow", 0.6), ("blue", 0.4)],
            Self::PartlyCloudy => [("blue", 0.7), ("orange", 0.5), ("purple", 0.3)],
            Self::Cloudy => [("gray", 0.8), ("blue", 0.5), ("gray", 0.6)],
            Self::Foggy => [("gray", 0.9), ("white", 0.7), ("gray", 0.5)],
            Self::Drizzle => [("gray", 0.7), ("blue", 0.5), ("purple", 0.4)],
            Self::Rainy => [("gray", 0.9), ("blue", 0.7), ("indigo", 0.6)],
            Self::Snowy => [("white", 0.9), ("blue", 0.4), ("cyan", 0.5)],
            Self::Stormy => [("black", 0.8), ("purple", 0.7), ("indigo", 0.6)],
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

pub fn classify(code: i64) -> WeatherCondition {
    WeatherCondition::from_code(code)
}

/// Symbolic icon identifier, grouped by precipitation type and intensity.
pub fn icon_name(code: i64) -> &'static str {
    match code {
        0 => "sun.max",
        1..=3 => "cloud.sun",
        45 | 48 => "cloud.fog",
        51 | 53 | 55 => "cloud.drizzle",
        56 | 57 | 66 | 67 => "cloud.sleet",
        61 | 63 | 65 => "cloud.rain",
        71 | 73 | 75 | 77 | 85 | 86 => "cloud.snow",
        80..=82 => "cloud.heavyrain",
        95 => "cloud.bolt",
        96 | 99 => "cloud.bolt.rain",
        _ => "sun.max",
    }
}

/// Human-readable phrase for a single code.
pub fn description(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown weather",
    }
}
