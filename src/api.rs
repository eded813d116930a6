use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Coordinates, Quote, RouteSelection, Slot};
use crate::error::Error;
use crate::selector::LocationUpdate;

#[async_trait]
pub trait SelectionAPI {
    async fn create_selection(&self) -> Result<RouteSelection, Error>;
    async fn find_selection(&self, id: Uuid) -> Result<RouteSelection, Error>;
    async fn delete_selection(&self, id: Uuid) -> Result<(), Error>;

    /// Without a slot the point goes into whichever slot is active.
    async fn select_point(
        &self,
        id: Uuid,
        coordinates: Coordinates,
        slot: Option<Slot>,
    ) -> Result<RouteSelection, Error>;

    async fn use_current_location(&self, id: Uuid) -> Result<LocationUpdate, Error>;
    async fn reset_selection(&self, id: Uuid) -> Result<RouteSelection, Error>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn create_quote(&self, pickup: Coordinates, dropoff: Coordinates) -> Result<Quote, Error>;
}

pub trait API: SelectionAPI + QuoteAPI {}
