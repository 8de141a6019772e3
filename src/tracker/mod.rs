//! Route tracking sessions.
//!
//! The tracker owns the map surface, the channel and the operator's route
//! selection. Submitting the selected route draws its path and asks the
//! server for directions; inbound events are routed by route id to the
//! session they belong to, and only an active session may touch the map.

mod events;
mod map_api;
mod route_api;
mod session_api;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_channel::Receiver;
use tokio::sync::Mutex;

use crate::{
    api::API,
    channel::{Channel, ServerEvent},
    entities::{Directory, Selection, Session},
    map::MapSurface,
    notify::Notifier,
};

struct Inner<M, C> {
    map: M,
    channel: C,
    directory: Directory,
    selection: Selection,
    sessions: HashMap<String, Session>,
}

pub struct Tracker<M, C> {
    inner: Mutex<Inner<M, C>>,
    events: Receiver<ServerEvent>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    torn_down: AtomicBool,
}

impl<M, C> Tracker<M, C>
where
    M: MapSurface + Send + 'static,
    C: Channel + Send + Sync + 'static,
{
    pub fn new(
        map: M,
        channel: C,
        directory: Directory,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        let events = channel.events();

        Self {
            inner: Mutex::new(Inner {
                map,
                channel,
                directory,
                selection: Selection::default(),
                sessions: HashMap::new(),
            }),
            events,
            notifier,
            torn_down: AtomicBool::new(false),
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Read access to the map surface.
    pub async fn with_map<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        let inner = self.inner.lock().await;
        f(&inner.map)
    }

    /// Read access to the channel.
    pub async fn with_channel<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        let inner = self.inner.lock().await;
        f(&inner.channel)
    }

    /// Disconnects the channel and stops event delivery. Sessions still
    /// active stay frozen where they are.
    #[tracing::instrument(skip(self))]
    pub async fn teardown(&self) {
        let closing = {
            let mut inner = self.inner.lock().await;

            if self.torn_down.swap(true, Ordering::SeqCst) {
                return;
            }

            self.events.close();

            let active = inner.sessions.values().filter(|s| s.is_active()).count();
            tracing::info!(active, "tracker torn down");

            inner.channel.disconnect()
        };

        // the transport finishes closing without holding up the operator
        closing.await;
    }
}

impl<M, C> API for Tracker<M, C>
where
    M: MapSurface + Send + 'static,
    C: Channel + Send + Sync + 'static,
{
}
