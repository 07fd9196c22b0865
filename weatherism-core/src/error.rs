//! Failures a single weather lookup can end in.
//!
//! The `Display` text of every variant is the message shown to the user, so the
//! orchestrator can publish `err.to_string()` directly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// A request URL could not be built from the configured base URL.
    #[error("Invalid URL")]
    InvalidUrl(String),

    #[error("No data received")]
    NoData,

    #[error("City not found. Please check the spelling and try again.")]
    CityNotFound,

    /// Rejected locally, before any request is made.
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("Weather service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed forecast: {0}")]
    MalformedForecast(String),
}
