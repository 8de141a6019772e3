use axum::extract::{Extension, Json, Path};

use crate::api::{DynAPI, SessionAPI};
use crate::{entities::Session, error::Error};

pub async fn start(Extension(api): Extension<DynAPI>) -> Result<Json<Session>, Error> {
    let session = api.start_session().await?;

    Ok(session.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(route_id): Path<String>,
) -> Result<Json<Session>, Error> {
    let session = api.find_session(route_id).await?;

    Ok(session.into())
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Session>>, Error> {
    let sessions = api.list_sessions().await?;

    Ok(sessions.into())
}
