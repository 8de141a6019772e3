use std::time::Duration;

use delivery_tracker::channel::{SimulatedChannel, WsChannel};
use delivery_tracker::config::Config;
use delivery_tracker::error::Error;
use delivery_tracker::external::routes_directory::HttpRoutesDirectory;
use delivery_tracker::startup;
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {:?}", err);
        std::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let routes = HttpRoutesDirectory::new(config.routes_api_base.clone());
    let geolocation = startup::geolocation(&config);

    let bootstrap = startup::prepare(&routes, geolocation.as_ref(), config.default_center).await;

    if config.simulate {
        tracing::info!("simulating the route server");

        let channel = SimulatedChannel::new(
            bootstrap.directory.clone(),
            config.simulation_interval.max(Duration::from_millis(1)),
        );

        startup::run(&config, bootstrap, channel, shutdown_signal()).await
    } else {
        let channel = WsChannel::new(config.channel_endpoint.clone());

        startup::run(&config, bootstrap, channel, shutdown_signal()).await
    }
}
