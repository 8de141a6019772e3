use super::{Inner, Tracker};

use async_trait::async_trait;

use crate::{
    api::{RouteAPI, RouteListing},
    channel::Channel,
    error::Error,
    map::MapSurface,
};

fn listing<M, C: Channel>(inner: &Inner<M, C>, torn_down: bool) -> RouteListing {
    let selected = inner.selection.selected().map(|route| route.id.clone());

    RouteListing {
        routes: inner
            .directory
            .routes()
            .iter()
            .map(|route| route.as_ref().clone())
            .collect(),
        can_submit: selected.is_some() && inner.channel.is_connected() && !torn_down,
        selected,
    }
}

#[async_trait]
impl<M, C> RouteAPI for Tracker<M, C>
where
    M: MapSurface + Send + 'static,
    C: Channel + Send + Sync + 'static,
{
    #[tracing::instrument(skip(self))]
    async fn list_routes(&self) -> Result<RouteListing, Error> {
        let inner = self.inner.lock().await;

        Ok(listing(&inner, self.is_torn_down()))
    }

    #[tracing::instrument(skip(self))]
    async fn select_route(&self, route_id: Option<String>) -> Result<RouteListing, Error> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;

        match route_id {
            Some(route_id) => inner.selection.select(&inner.directory, &route_id)?,
            None => inner.selection.clear(),
        }

        Ok(listing(inner, self.is_torn_down()))
    }
}
