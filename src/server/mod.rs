mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::API;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{quotes, selections};

type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/selections", post(selections::create))
        .route(
            "/selections/:id",
            get(selections::find).delete(selections::delete),
        )
        .route("/selections/:id/points", post(selections::select_point))
        .route(
            "/selections/:id/current_location",
            post(selections::use_current_location),
        )
        .route("/selections/:id/reset", patch(selections::reset))
        .route("/quotes", post(quotes::create))
        .layer(Extension(api))
}

pub async fn serve<T>(api: T, addr: SocketAddr) -> Result<(), Error>
where
    T: API + Sync + Send + 'static,
{
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!("server error: {}", err);
            unexpected_error()
        })
}
