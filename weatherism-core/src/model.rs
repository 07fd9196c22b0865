use serde::{Deserialize, Serialize};

use crate::{LookupError, condition::WeatherCondition};

/// A geocoded place, as returned by the geocoding search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// "London, United Kingdom"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: String,
    #[serde(rename = "temperature_2m")]
    pub temperature_c: f64,
    #[serde(rename = "apparent_temperature")]
    pub apparent_temperature_c: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub relative_humidity_pct: i64,
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed_kmh: f64,
    #[serde(rename = "wind_direction_10m")]
    pub wind_direction_deg: f64,
    pub weather_code: i64,
}

impl CurrentConditions {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_code(self.weather_code)
    }
}

/// Index-aligned daily series; index 0 is today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    pub max_temperature_c: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub min_temperature_c: Vec<f64>,
}

impl DailySummary {
    /// `(date, max, min)` per day.
    pub fn days(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.time
            .iter()
            .zip(&self.max_temperature_c)
            .zip(&self.min_temperature_c)
            .map(|((time, max), min)| (time.as_str(), *max, *min))
    }

    pub fn today(&self) -> Option<(&str, f64, f64)> {
        self.days().next()
    }
}

/// Index-aligned hourly series in ascending time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySummary {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature_c: Vec<f64>,
}

impl HourlySummary {
    pub fn hours(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.time.iter().zip(&self.temperature_c).map(|(time, temp)| (time.as_str(), *temp))
    }
}

/// Everything fetched for one coordinate pair in a single round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub current: CurrentConditions,
    pub daily: DailySummary,
    pub hourly: HourlySummary,
}

impl ForecastBundle {
    /// Rejects bundles whose parallel series disagree in length.
    pub fn check_aligned(&self) -> Result<(), LookupError> {
        let daily = &self.daily;
        if daily.max_temperature_c.len() != daily.time.len()
            || daily.min_temperature_c.len() != daily.time.len()
        {
            return Err(LookupError::MalformedForecast(format!(
                "daily series lengths differ (time={}, max={}, min={})",
                daily.time.len(),
                daily.max_temperature_c.len(),
                daily.min_temperature_c.len(),
            )));
        }

        let hourly = &self.hourly;
        if hourly.temperature_c.len() != hourly.time.len() {
            return Err(LookupError::MalformedForecast(format!(
                "hourly series lengths differ (time={}, temperature={})",
                hourly.time.len(),
                hourly.temperature_c.len(),
            )));
        }

        Ok(())
    }
}
