use super::Tracker;

use async_trait::async_trait;

use crate::{
    api::{ChannelStatus, SessionAPI},
    channel::{Channel, ClientCommand},
    entities::Session,
    error::{
        channel_disconnected_error, invalid_input_error, invalid_state_error,
        submission_without_selection_error, Error,
    },
    map::{MapSurface, MarkerOptions, Symbol},
};

#[async_trait]
impl<M, C> SessionAPI for Tracker<M, C>
where
    M: MapSurface + Send + 'static,
    C: Channel + Send + Sync + 'static,
{
    #[tracing::instrument(skip(self))]
    async fn start_session(&self) -> Result<Session, Error> {
        let mut guard = self.inner.lock().await;

        if self.is_torn_down() {
            return Err(channel_disconnected_error());
        }

        let inner = &mut *guard;

        let route = inner
            .selection
            .selected()
            .cloned()
            .ok_or_else(submission_without_selection_error)?;

        if !inner.channel.is_connected() {
            tracing::warn!("channel is down, refusing to start route {}", route.id);
            return Err(channel_disconnected_error());
        }

        let replacing = inner
            .sessions
            .get(&route.id)
            .map(|session| session.is_active())
            .unwrap_or(false);

        if replacing {
            tracing::info!("route {} already active, replacing its session", route.id);
            inner.map.remove_path(&route.id);
        }

        let mut session = Session::new(&route);

        inner.map.add_path(
            &route.id,
            MarkerOptions {
                title: route.title.clone(),
                position: route.start_position,
                symbol: Symbol::Vehicle,
            },
            MarkerOptions {
                title: route.title.clone(),
                position: route.end_position,
                symbol: Symbol::Destination,
            },
        );

        let command = ClientCommand::GetDirections {
            route_id: route.id.clone(),
        };

        if let Err(err) = inner.channel.emit(command).await {
            tracing::warn!("failed to request directions for {}: {}", route.id, err);

            inner.map.remove_path(&route.id);
            if replacing {
                inner.sessions.remove(&route.id);
            }

            return Err(err);
        }

        session.activate()?;
        inner.sessions.insert(route.id.clone(), session.clone());

        tracing::info!("started session {} for route {}", session.id, route.id);

        Ok(session)
    }

    #[tracing::instrument(skip(self))]
    async fn find_session(&self, route_id: String) -> Result<Session, Error> {
        let inner = self.inner.lock().await;

        inner
            .sessions
            .get(&route_id)
            .cloned()
            .ok_or_else(invalid_input_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list_sessions(&self) -> Result<Vec<Session>, Error> {
        let inner = self.inner.lock().await;

        let mut sessions: Vec<Session> = inner.sessions.values().cloned().collect();
        sessions.sort_by(|a, b| a.started_at.cmp(&b.started_at));

        Ok(sessions)
    }

    #[tracing::instrument(skip(self))]
    async fn connect_channel(&self) -> Result<ChannelStatus, Error> {
        let mut inner = self.inner.lock().await;

        if self.is_torn_down() {
            return Err(invalid_state_error());
        }

        inner.channel.connect().await?;

        Ok(ChannelStatus {
            connected: inner.channel.is_connected(),
        })
    }
}
