//! Core library for the `weatherism` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The `WeatherService` abstraction over geocoding and forecast retrieval,
//!   with an Open-Meteo implementation
//! - Shared domain models and the weather-code classifier
//! - The lookup orchestrator and its published state
//!
//! It is used by `weatherism-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use condition::{WeatherCondition, classify, description, icon_name};
pub use config::{Config, Endpoints};
pub use error::LookupError;
pub use lookup::{LookupState, WeatherLookup};
pub use model::{CurrentConditions, DailySummary, ForecastBundle, HourlySummary, Location};
pub use provider::{WeatherService, open_meteo::OpenMeteoService, service_from_config};
