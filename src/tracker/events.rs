use std::sync::Arc;

use tokio::task::JoinHandle;

use super::Tracker;
use crate::{
    channel::{Channel, ServerEvent},
    map::MapSurface,
    notify::Notification,
};

impl<M, C> Tracker<M, C>
where
    M: MapSurface + Send + 'static,
    C: Channel + Send + Sync + 'static,
{
    /// Applies one inbound event. Events for routes without an active
    /// session are dropped.
    #[tracing::instrument(skip(self))]
    pub async fn dispatch(&self, event: ServerEvent) {
        let mut guard = self.inner.lock().await;

        if self.is_torn_down() {
            tracing::debug!("tracker torn down, dropping event");
            return;
        }

        let inner = &mut *guard;

        let session = match inner.sessions.get_mut(event.route_id()) {
            Some(session) if session.is_active() => session,
            _ => {
                tracing::debug!("no active session for route, ignoring");
                return;
            }
        };

        match event {
            ServerEvent::NewPosition { route_id, path } => {
                if let Err(err) = session.record_position(path) {
                    tracing::warn!("could not record position: {}", err);
                    return;
                }

                inner.map.move_current_marker(&route_id, path);
            }
            ServerEvent::FinishedRoute { route_id } => {
                if let Err(err) = session.complete() {
                    tracing::warn!("could not complete session: {}", err);
                    return;
                }

                inner.map.remove_path(&route_id);

                self.notifier
                    .notify(Notification::route_finished(&route_id, &session.route_title));
            }
        }
    }

    /// Pumps the channel's event stream into `dispatch` until teardown
    /// closes it.
    pub fn listen(self: &Arc<Self>) -> JoinHandle<()> {
        let tracker = self.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                tracker.dispatch(event).await;
            }

            tracing::debug!("event stream closed");
        })
    }
}
