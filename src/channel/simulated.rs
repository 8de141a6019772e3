use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use futures::{future, FutureExt};
use tokio::task::JoinHandle;

use super::{Channel, ClientCommand, Closing, ServerEvent};
use crate::entities::{Directory, LatLng, Route};
use crate::error::{channel_disconnected_error, Error};

const INTERPOLATION_STEPS: usize = 10;

/// Offline stand-in for the route server: answers `get-directions` by
/// replaying the route's waypoints, then reports the route finished. At most
/// one replay runs per route; asking again restarts it.
pub struct SimulatedChannel {
    directory: Directory,
    interval: Duration,
    events_tx: Sender<ServerEvent>,
    events_rx: Receiver<ServerEvent>,
    connected: AtomicBool,
    drives: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl SimulatedChannel {
    pub fn new(directory: Directory, interval: Duration) -> Self {
        let (events_tx, events_rx) = async_channel::unbounded();

        Self {
            directory,
            interval,
            events_tx,
            events_rx,
            connected: AtomicBool::new(false),
            drives: Mutex::new(HashMap::new()),
        }
    }
}

/// Positions reported for a route, ending at its destination.
pub fn waypoints(route: &Route) -> Vec<LatLng> {
    if !route.points.is_empty() {
        return route.points.clone();
    }

    (1..=INTERPOLATION_STEPS)
        .map(|step| {
            let t = step as f64 / INTERPOLATION_STEPS as f64;
            route.start_position.lerp(&route.end_position, t)
        })
        .collect()
}

async fn drive(route: Arc<Route>, interval: Duration, events: Sender<ServerEvent>) {
    for path in waypoints(&route) {
        tokio::time::sleep(interval).await;

        let event = ServerEvent::NewPosition {
            route_id: route.id.clone(),
            path,
        };

        if events.send(event).await.is_err() {
            return;
        }
    }

    let _ = events
        .send(ServerEvent::FinishedRoute {
            route_id: route.id.clone(),
        })
        .await;

    tracing::info!(route_id = %route.id, "simulated route finished");
}

#[async_trait]
impl Channel for SimulatedChannel {
    async fn connect(&mut self) -> Result<(), Error> {
        if !self.connected.swap(true, Ordering::SeqCst) {
            tracing::info!("simulated channel connected");
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn emit(&self, command: ClientCommand) -> Result<(), Error> {
        if !self.is_connected() {
            return Err(channel_disconnected_error());
        }

        let ClientCommand::GetDirections { route_id } = command;

        let route = match self.directory.find(&route_id) {
            Some(route) => route.clone(),
            None => {
                tracing::warn!("no directions for unknown route {}", route_id);
                return Ok(());
            }
        };

        let mut drives = self.drives.lock().map_err(|_| channel_disconnected_error())?;
        drives.retain(|_, drive| !drive.is_finished());

        if let Some(previous) = drives.remove(&route.id) {
            tracing::info!("restarting directions for route {}", route.id);
            previous.abort();
        }

        let handle = tokio::spawn(drive(route.clone(), self.interval, self.events_tx.clone()));
        drives.insert(route.id.clone(), handle);

        Ok(())
    }

    fn events(&self) -> Receiver<ServerEvent> {
        self.events_rx.clone()
    }

    fn disconnect(&mut self) -> Closing {
        self.connected.store(false, Ordering::SeqCst);

        if let Ok(mut drives) = self.drives.lock() {
            for (_, drive) in drives.drain() {
                drive.abort();
            }
        }

        future::ready(()).boxed()
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
