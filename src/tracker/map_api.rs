use super::Tracker;

use async_trait::async_trait;

use crate::{
    api::MapAPI,
    channel::Channel,
    error::Error,
    map::{MapSnapshot, MapSurface},
    notify::Notification,
};

#[async_trait]
impl<M, C> MapAPI for Tracker<M, C>
where
    M: MapSurface + Send + 'static,
    C: Channel + Send + Sync + 'static,
{
    async fn map_snapshot(&self) -> Result<MapSnapshot, Error> {
        let inner = self.inner.lock().await;

        Ok(inner.map.snapshot())
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>, Error> {
        Ok(self.notifier.recent())
    }
}
