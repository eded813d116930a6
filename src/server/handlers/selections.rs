use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, RouteSelection, Slot};
use crate::error::Error;
use crate::selector::LocationUpdate;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SelectPointParams {
    point: Coordinates,
    slot: Option<Slot>,
}

pub async fn create(Extension(api): Extension<DynAPI>) -> Result<Json<RouteSelection>, Error> {
    let selection = api.create_selection().await?;

    Ok(selection.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteSelection>, Error> {
    let selection = api.find_selection(id).await?;

    Ok(selection.into())
}

pub async fn delete(Extension(api): Extension<DynAPI>, Path(id): Path<Uuid>) -> Result<(), Error> {
    api.delete_selection(id).await
}

pub async fn select_point(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<SelectPointParams>,
) -> Result<Json<RouteSelection>, Error> {
    let selection = api.select_point(id, params.point, params.slot).await?;

    Ok(selection.into())
}

pub async fn use_current_location(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<LocationUpdate>, Error> {
    let update = api.use_current_location(id).await?;

    Ok(update.into())
}

pub async fn reset(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteSelection>, Error> {
    let selection = api.reset_selection(id).await?;

    Ok(selection.into())
}
