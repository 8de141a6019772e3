mod handlers;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post, put},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{channel, map, routes, sessions};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/routes", get(routes::list))
        .route("/selection", put(routes::select))
        .route("/sessions", get(sessions::list).post(sessions::start))
        .route("/sessions/:route_id", get(sessions::find))
        .route("/map", get(map::snapshot))
        .route("/notifications", get(map::notifications))
        .route("/channel/connect", post(channel::connect))
        .layer(Extension(api))
}

pub async fn serve<T, S>(api: Arc<T>, addr: SocketAddr, shutdown: S) -> Result<(), Error>
where
    T: API + Sync + Send + 'static,
    S: Future<Output = ()> + Send + 'static,
{
    let api = api as DynAPI;

    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| {
            tracing::error!("server error: {:?}", err);
            unexpected_error()
        })
}
