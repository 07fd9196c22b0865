//! Search orchestration: geocode, then fetch, then publish.
//!
//! [`WeatherLookup`] owns the only mutable state in the crate, a single
//! [`LookupState`] cell behind a `tokio::sync::watch` channel. Presentation code
//! either polls [`WeatherLookup::state`] or awaits changes on a
//! [`WeatherLookup::subscribe`] receiver.
//!
//! Every search takes a number from a monotonic sequence. A task only publishes its
//! result if no newer search has started in the meantime, so overlapping searches
//! settle on the most recent one regardless of completion order. A rejected blank
//! query is not a search and does not advance the sequence.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    LookupError, WeatherService,
    condition::WeatherCondition,
    model::{ForecastBundle, Location},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success {
        location: Location,
        bundle: ForecastBundle,
    },
    Failed(String),
}

impl LookupState {
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Success { location, .. } => Some(location),
            _ => None,
        }
    }

    pub fn bundle(&self) -> Option<&ForecastBundle> {
        match self {
            Self::Success { bundle, .. } => Some(bundle),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn has_weather_data(&self) -> bool {
        self.bundle().is_some()
    }

    /// "London, United Kingdom", or "Unknown" without a location.
    pub fn location_display_name(&self) -> String {
        self.location().map_or_else(|| "Unknown".to_string(), Location::display_name)
    }

    pub fn current_condition(&self) -> WeatherCondition {
        self.bundle().map(|b| b.current.condition()).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct WeatherLookup {
    service: Arc<dyn WeatherService>,
    state: Arc<watch::Sender<LookupState>>,
    latest: Arc<AtomicU64>,
}

impl WeatherLookup {
    pub fn new(service: Arc<dyn WeatherService>) -> Self {
        let (state, _) = watch::channel(LookupState::Idle);
        Self { service, state: Arc::new(state), latest: Arc::new(AtomicU64::new(0)) }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LookupState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    /// Start a search for `raw_query`.
    ///
    /// Blank input fails immediately without contacting the service and returns
    /// `None`. Otherwise the state moves to `Loading` and the lookup runs on a
    /// spawned task whose handle is returned. Must be called within a Tokio runtime.
    pub fn search(&self, raw_query: &str) -> Option<JoinHandle<()>> {
        let query = raw_query.trim();
        if query.is_empty() {
            // Not a search: a pending lookup may still publish over this.
            self.state.send_replace(LookupState::Failed(LookupError::EmptyQuery.to_string()));
            return None;
        }

        // Sequence numbers are taken under the state lock so their order matches
        // the order of the `Loading` writes.
        let mut seq = 0;
        self.state.send_modify(|current| {
            seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *current = LookupState::Loading;
        });

        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.latest);
        let query = query.to_string();

        Some(tokio::spawn(async move {
            let next = match run_lookup(service.as_ref(), &query).await {
                Ok((location, bundle)) => {
                    info!(query = %query, location = %location.display_name(), "lookup succeeded");
                    LookupState::Success { location, bundle }
                }
                Err(err) => {
                    warn!(query = %query, error = %err, "lookup failed");
                    LookupState::Failed(err.to_string())
                }
            };

            let published = state.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) != seq {
                    return false;
                }
                *current = next;
                true
            });

            if !published {
                debug!(query = %query, seq, "discarding result superseded by a newer search");
            }
        }))
    }

    /// Re-run the last successful search by the resolved location's name.
    /// No-op unless the state is `Success`.
    pub fn refresh(&self) -> Option<JoinHandle<()>> {
        let name = match &*self.state.borrow() {
            LookupState::Success { location, .. } => location.name.clone(),
            _ => return None,
        };

        self.search(&name)
    }
}

async fn run_lookup(
    service: &dyn WeatherService,
    query: &str,
) -> Result<(Location, ForecastBundle), LookupError> {
    let location = service.resolve(query).await?;
    let bundle = service.fetch(location.latitude, location.longitude).await?;
    Ok((location, bundle))
}
