use std::future::Future;
use std::sync::Arc;

use crate::{
    channel::Channel,
    config::Config,
    entities::{Directory, LatLng},
    error::{directory_fetch_failed_error, Error},
    external::{
        geolocation::{locate, FixedGeolocation, Geolocation, HttpGeolocation},
        routes_directory::RoutesDirectory,
    },
    map::{ColorPicker, InMemoryMap, MapOptions, MapSurface},
    notify::FeedNotifier,
    server,
    tracker::Tracker,
};

/// What the client needs before the map can be shown.
#[derive(Clone, Debug)]
pub struct Bootstrap {
    pub directory: Directory,
    pub center: LatLng,
}

pub fn geolocation(config: &Config) -> Box<dyn Geolocation + Send + Sync> {
    match (&config.current_position, &config.geolocation_api_url) {
        (Some(position), _) => Box::new(FixedGeolocation::new(Some(*position))),
        (None, Some(url)) => Box::new(HttpGeolocation::new(url.clone())),
        (None, None) => Box::new(FixedGeolocation::new(None)),
    }
}

/// Fetches the route directory. A failure leaves the directory empty.
pub async fn load_directory<D: RoutesDirectory + ?Sized>(routes: &D) -> Directory {
    match routes.fetch_routes().await {
        Ok(routes) => Directory::new(routes),
        Err(err) => {
            tracing::warn!("{}: {}", directory_fetch_failed_error(), err);
            Directory::default()
        }
    }
}

/// Directory fetch and geolocation do not depend on each other, so both run
/// at once.
#[tracing::instrument(skip_all)]
pub async fn prepare<D, G>(routes: &D, geolocation: &G, fallback: LatLng) -> Bootstrap
where
    D: RoutesDirectory + ?Sized,
    G: Geolocation + ?Sized,
{
    let (directory, center) = tokio::join!(load_directory(routes), locate(geolocation, fallback));

    tracing::info!(
        "{} routes available, map centered on {}",
        directory.routes().len(),
        center
    );

    Bootstrap { directory, center }
}

pub fn initialize_map(config: &Config, center: LatLng) -> Result<InMemoryMap, Error> {
    let mut map = InMemoryMap::new(config.maps_api_key.clone(), ColorPicker::from_entropy());

    map.initialize(MapOptions {
        zoom: config.map_zoom,
        center,
    })?;

    Ok(map)
}

/// Runs the client until `shutdown` resolves, then tears the tracker down.
pub async fn run<C, S>(
    config: &Config,
    bootstrap: Bootstrap,
    mut channel: C,
    shutdown: S,
) -> Result<(), Error>
where
    C: Channel + Send + Sync + 'static,
    S: Future<Output = ()> + Send + 'static,
{
    let map = initialize_map(config, bootstrap.center)?;

    if let Err(err) = channel.connect().await {
        tracing::warn!("channel unavailable, new routes cannot start: {}", err);
    }

    let tracker = Arc::new(Tracker::new(
        map,
        channel,
        bootstrap.directory,
        Arc::new(FeedNotifier::default()),
    ));

    let listener = tracker.listen();

    let served = server::serve(tracker.clone(), config.listen_addr, shutdown).await;

    tracker.teardown().await;
    let _ = listener.await;

    served
}
