mod helpers;
mod quote_api;
mod selection_api;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    api::API,
    config::{Config, FareConfig, DEFAULT_LOCATION_TIMEOUT_SECS, DEFAULT_SELECTION_IDLE_SECS},
    external::ip_geolocation::IpGeolocationProvider,
    location::{DynLocationProvider, FixedLocationProvider},
    selector::RouteSelector,
};

type SelectionHandle = Arc<Mutex<RouteSelector>>;

/// Holds one route selection per client session.
pub struct Engine {
    selections: RwLock<HashMap<Uuid, SelectionHandle>>,
    fare: FareConfig,
    location_provider: DynLocationProvider,
    location_timeout: Duration,
    selection_idle_timeout: Duration,
}

impl Engine {
    pub fn new(fare: FareConfig, location_provider: DynLocationProvider) -> Self {
        Self {
            selections: RwLock::new(HashMap::new()),
            fare,
            location_provider,
            location_timeout: Duration::from_secs(DEFAULT_LOCATION_TIMEOUT_SECS),
            selection_idle_timeout: Duration::from_secs(DEFAULT_SELECTION_IDLE_SECS),
        }
    }

    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }

    pub fn with_selection_idle_timeout(mut self, timeout: Duration) -> Self {
        self.selection_idle_timeout = timeout;
        self
    }

    #[tracing::instrument(name = "Engine::from_config", skip_all)]
    pub fn from_config(config: &Config) -> Self {
        let location_provider: DynLocationProvider = match &config.geolocation_url {
            Some(url) => Arc::new(IpGeolocationProvider::new(url.clone())),
            None => {
                tracing::info!("no geolocation url configured, location requests will be denied");
                Arc::new(FixedLocationProvider::denied())
            }
        };

        Self::new(config.fare, location_provider)
            .with_location_timeout(config.location_timeout)
            .with_selection_idle_timeout(config.selection_idle_timeout)
    }
}

impl API for Engine {}
