use axum::extract::{Extension, Json};

use crate::api::{ChannelStatus, DynAPI, SessionAPI};
use crate::error::Error;

pub async fn connect(Extension(api): Extension<DynAPI>) -> Result<Json<ChannelStatus>, Error> {
    let status = api.connect_channel().await?;

    Ok(status.into())
}
