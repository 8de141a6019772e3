use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, RouteAPI, RouteListing};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectParams {
    route_id: Option<String>,
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<RouteListing>, Error> {
    let listing = api.list_routes().await?;

    Ok(listing.into())
}

pub async fn select(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SelectParams>,
) -> Result<Json<RouteListing>, Error> {
    let listing = api.select_route(params.route_id).await?;

    Ok(listing.into())
}
