use super::Engine;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    api::SelectionAPI,
    entities::{Coordinates, RouteSelection, Slot},
    error::{invalid_input_error, invalid_state_error, Error},
    location::request_position,
    selector::{LocationUpdate, RouteSelector},
};

#[async_trait]
impl SelectionAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_selection(&self) -> Result<RouteSelection, Error> {
        self.prune_idle_selections(Utc::now()).await;

        let selector = RouteSelector::new(self.fare);
        let selection = selector.snapshot();

        self.selections
            .write()
            .await
            .insert(selection.id, Arc::new(Mutex::new(selector)));

        tracing::info!("created selection {}", selection.id);

        Ok(selection)
    }

    #[tracing::instrument(skip(self))]
    async fn find_selection(&self, id: Uuid) -> Result<RouteSelection, Error> {
        let handle = self.fetch_selection(&id).await?;
        let selector = handle.lock().await;

        Ok(selector.snapshot())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_selection(&self, id: Uuid) -> Result<(), Error> {
        self.selections
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(invalid_input_error)
    }

    #[tracing::instrument(skip(self))]
    async fn select_point(
        &self,
        id: Uuid,
        coordinates: Coordinates,
        slot: Option<Slot>,
    ) -> Result<RouteSelection, Error> {
        let handle = self.fetch_selection(&id).await?;
        let mut selector = handle.lock().await;

        match slot {
            Some(slot) => selector.select_point(coordinates, slot)?,
            None => selector.select_next_point(coordinates)?,
        }

        Ok(selector.snapshot())
    }

    #[tracing::instrument(skip(self))]
    async fn use_current_location(&self, id: Uuid) -> Result<LocationUpdate, Error> {
        let handle = self.fetch_selection(&id).await?;

        // the lock is released while the provider runs so a reset can land
        let ticket = handle
            .lock()
            .await
            .begin_location_request()
            .ok_or_else(invalid_state_error)?;

        let result = request_position(&*self.location_provider, self.location_timeout).await;

        let mut selector = handle.lock().await;
        let outcome = selector.apply_location(ticket, result);

        tracing::info!("location request for {} finished: {:?}", id, outcome);

        Ok(LocationUpdate {
            outcome,
            selection: selector.snapshot(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn reset_selection(&self, id: Uuid) -> Result<RouteSelection, Error> {
        let handle = self.fetch_selection(&id).await?;
        let mut selector = handle.lock().await;

        selector.reset();

        Ok(selector.snapshot())
    }
}
