use axum::extract::{Extension, Json};

use crate::api::{DynAPI, MapAPI};
use crate::{error::Error, map::MapSnapshot, notify::Notification};

pub async fn snapshot(Extension(api): Extension<DynAPI>) -> Result<Json<MapSnapshot>, Error> {
    let snapshot = api.map_snapshot().await?;

    Ok(snapshot.into())
}

pub async fn notifications(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<Notification>>, Error> {
    let notifications = api.list_notifications().await?;

    Ok(notifications.into())
}
