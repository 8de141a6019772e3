#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use futures::{future, FutureExt};
use tokio::sync::Notify;

use delivery_tracker::channel::{Channel, ClientCommand, Closing, ServerEvent};
use delivery_tracker::entities::{Directory, LatLng, Route};
use delivery_tracker::error::{channel_disconnected_error, Error};
use delivery_tracker::map::{MapHandle, MapOptions, MapSnapshot, MapSurface, MarkerOptions};
use delivery_tracker::notify::FeedNotifier;
use delivery_tracker::tracker::Tracker;

#[derive(Clone, Debug, PartialEq)]
pub enum MapCall {
    Initialize(MapOptions),
    AddPath {
        route_id: String,
        start: MarkerOptions,
        end: MarkerOptions,
    },
    MoveCurrentMarker {
        route_id: String,
        position: LatLng,
    },
    RemovePath(String),
}

/// Records every call made to the surface.
#[derive(Debug, Default)]
pub struct RecordingMap {
    pub calls: Vec<MapCall>,
}

impl RecordingMap {
    pub fn count(&self, matches: impl Fn(&MapCall) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }
}

impl MapSurface for RecordingMap {
    fn initialize(&mut self, options: MapOptions) -> Result<MapHandle, Error> {
        self.calls.push(MapCall::Initialize(options));
        Ok(MapHandle(uuid::Uuid::nil()))
    }

    fn add_path(&mut self, route_id: &str, start: MarkerOptions, end: MarkerOptions) {
        self.calls.push(MapCall::AddPath {
            route_id: route_id.into(),
            start,
            end,
        });
    }

    fn move_current_marker(&mut self, route_id: &str, position: LatLng) {
        self.calls.push(MapCall::MoveCurrentMarker {
            route_id: route_id.into(),
            position,
        });
    }

    fn remove_path(&mut self, route_id: &str) {
        self.calls.push(MapCall::RemovePath(route_id.into()));
    }

    fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            handle: None,
            options: None,
            api_key: None,
            paths: vec![],
        }
    }
}

/// In-process channel: the test plays the server through `server()`.
pub struct LoopbackChannel {
    connected: AtomicBool,
    events_tx: Sender<ServerEvent>,
    events_rx: Receiver<ServerEvent>,
    emitted: Arc<Mutex<Vec<ClientCommand>>>,
    slow_close: Arc<AtomicBool>,
    close_gate: Arc<Notify>,
}

#[derive(Clone)]
pub struct LoopbackServer {
    events: Sender<ServerEvent>,
    emitted: Arc<Mutex<Vec<ClientCommand>>>,
    slow_close: Arc<AtomicBool>,
    close_gate: Arc<Notify>,
}

impl LoopbackChannel {
    pub fn new() -> Self {
        let (events_tx, events_rx) = async_channel::unbounded();

        Self {
            connected: AtomicBool::new(false),
            events_tx,
            events_rx,
            emitted: Arc::new(Mutex::new(vec![])),
            slow_close: Arc::new(AtomicBool::new(false)),
            close_gate: Arc::new(Notify::new()),
        }
    }

    pub fn server(&self) -> LoopbackServer {
        LoopbackServer {
            events: self.events_tx.clone(),
            emitted: self.emitted.clone(),
            slow_close: self.slow_close.clone(),
            close_gate: self.close_gate.clone(),
        }
    }
}

impl LoopbackServer {
    pub async fn push(&self, event: ServerEvent) {
        // the tracker may have closed the stream on teardown
        let _ = self.events.send(event).await;
    }

    pub fn emitted(&self) -> Vec<ClientCommand> {
        self.emitted.lock().unwrap().clone()
    }

    /// Closing the channel hangs until `release_close`.
    pub fn hold_close(&self) {
        self.slow_close.store(true, Ordering::SeqCst);
    }

    pub fn release_close(&self) {
        self.close_gate.notify_one();
    }
}

#[async_trait]
impl Channel for LoopbackChannel {
    async fn connect(&mut self) -> Result<(), Error> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn emit(&self, command: ClientCommand) -> Result<(), Error> {
        if !self.is_connected() {
            return Err(channel_disconnected_error());
        }

        self.emitted.lock().unwrap().push(command);
        Ok(())
    }

    fn events(&self) -> Receiver<ServerEvent> {
        self.events_rx.clone()
    }

    fn disconnect(&mut self) -> Closing {
        self.connected.store(false, Ordering::SeqCst);

        if !self.slow_close.load(Ordering::SeqCst) {
            return future::ready(()).boxed();
        }

        let gate = self.close_gate.clone();
        async move { gate.notified().await }.boxed()
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

pub fn route(id: &str, start: LatLng, end: LatLng) -> Route {
    Route {
        id: id.into(),
        title: format!("Rota {}", id.trim_start_matches('r')),
        start_position: start,
        end_position: end,
        points: vec![],
    }
}

pub fn directory() -> Directory {
    Directory::new(vec![
        route("r1", LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)),
        route("r2", LatLng::new(2.0, 2.0), LatLng::new(3.0, 3.0)),
    ])
}

pub type TestTracker = Tracker<RecordingMap, LoopbackChannel>;

/// A tracker wired to doubles, channel connected.
pub async fn tracker() -> (Arc<TestTracker>, LoopbackServer, Arc<FeedNotifier>) {
    let mut channel = LoopbackChannel::new();
    channel.connect().await.unwrap();
    let server = channel.server();

    let notifier = Arc::new(FeedNotifier::default());
    let tracker = Tracker::new(
        RecordingMap::default(),
        channel,
        directory(),
        notifier.clone(),
    );

    (Arc::new(tracker), server, notifier)
}
