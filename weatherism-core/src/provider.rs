use crate::{
    Config, LookupError,
    model::{ForecastBundle, Location},
    provider::open_meteo::OpenMeteoService,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;

/// Geocoding plus forecast retrieval, swappable for tests.
#[async_trait]
pub trait WeatherService: Send + Sync + Debug {
    /// Resolve a free-text place name to its best match. `query` is already trimmed.
    async fn resolve(&self, query: &str) -> Result<Location, LookupError>;

    /// Current, daily and hourly data for one coordinate pair.
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<ForecastBundle, LookupError>;
}

/// Construct the production service from the configured endpoints.
pub fn service_from_config(config: &Config) -> Arc<dyn WeatherService> {
    Arc::new(OpenMeteoService::new(&config.endpoints))
}
