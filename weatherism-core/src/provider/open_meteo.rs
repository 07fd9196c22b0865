use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::{
    LookupError,
    config::Endpoints,
    model::{ForecastBundle, Location},
};

use super::WeatherService;

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,wind_speed_10m,wind_direction_10m,weather_code";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min";
const HOURLY_FIELDS: &str = "temperature_2m";

/// Open-Meteo geocoding and forecast APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoService {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoService {
    pub fn new(endpoints: &Endpoints) -> Self {
        Self {
            geocoding_url: endpoints.geocoding.clone(),
            forecast_url: endpoints.forecast.clone(),
            http: Client::new(),
        }
    }

    async fn get_body(&self, url: Url) -> Result<String, LookupError> {
        debug!(%url, "sending request");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        if body.trim().is_empty() {
            return Err(LookupError::NoData);
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<Location>>,
}

#[async_trait]
impl WeatherService for OpenMeteoService {
    async fn resolve(&self, query: &str) -> Result<Location, LookupError> {
        let mut url = endpoint(&self.geocoding_url, "search")?;
        url.query_pairs_mut()
            .append_pair("name", query)
            .append_pair("count", "1")
            .append_pair("language", "en")
            .append_pair("format", "json");

        let body = self.get_body(url).await?;
        let parsed: GeocodingResponse = serde_json::from_str(&body)?;

        parsed.results.and_then(|r| r.into_iter().next()).ok_or(LookupError::CityNotFound)
    }

    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<ForecastBundle, LookupError> {
        let mut url = endpoint(&self.forecast_url, "forecast")?;
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("current", CURRENT_FIELDS)
            .append_pair("daily", DAILY_FIELDS)
            .append_pair("hourly", HOURLY_FIELDS)
            .append_pair("timezone", "auto");

        let body = self.get_body(url).await?;
        let bundle: ForecastBundle = serde_json::from_str(&body)?;
        bundle.check_aligned()?;

        Ok(bundle)
    }
}

fn endpoint(base: &str, path: &str) -> Result<Url, LookupError> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|e| {
        let detail = format!("{raw}: {e}");
        debug!(detail = %detail, "could not build request URL");
        LookupError::InvalidUrl(detail)
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
