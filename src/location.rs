use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::entities::Coordinates;
use crate::error::{location_unavailable_error, Error};

/// Source of the device's current position.
#[async_trait]
pub trait LocationProvider {
    async fn current_position(&self) -> Result<Coordinates, Error>;
}

pub type DynLocationProvider = Arc<dyn LocationProvider + Send + Sync>;

/// Always answers with the same position, or denies when built with
/// `denied()`.
#[derive(Clone, Debug)]
pub struct FixedLocationProvider {
    position: Option<Coordinates>,
}

impl FixedLocationProvider {
    pub fn new(position: Coordinates) -> Self {
        Self {
            position: Some(position),
        }
    }

    pub fn denied() -> Self {
        Self { position: None }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self) -> Result<Coordinates, Error> {
        self.position.ok_or_else(location_unavailable_error)
    }
}

/// Single-shot position request bounded by `timeout`. Every failure,
/// including expiry, comes back as a location unavailable error.
#[tracing::instrument(skip(provider))]
pub async fn request_position(
    provider: &(dyn LocationProvider + Send + Sync),
    timeout: Duration,
) -> Result<Coordinates, Error> {
    match tokio::time::timeout(timeout, provider.current_position()).await {
        Ok(Ok(coordinates)) => Ok(coordinates),
        Ok(Err(err)) => {
            tracing::warn!("location provider failed: {}", err);
            Err(location_unavailable_error())
        }
        Err(_) => {
            tracing::warn!("location request timed out after {:?}", timeout);
            Err(location_unavailable_error())
        }
    }
}
