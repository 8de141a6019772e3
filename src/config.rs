use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::entities::LatLng;
use crate::error::{config_error, Error};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub routes_api_base: String,
    pub channel_endpoint: String,
    pub maps_api_key: Option<String>,
    pub listen_addr: SocketAddr,
    pub map_zoom: u8,
    pub default_center: LatLng,
    pub current_position: Option<LatLng>,
    pub geolocation_api_url: Option<String>,
    pub simulate: bool,
    pub simulation_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes_api_base: "http://localhost:3000".into(),
            channel_endpoint: "ws://localhost:3000/routes".into(),
            maps_api_key: None,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            map_zoom: 15,
            default_center: LatLng::new(-23.5505, -46.6333),
            current_position: None,
            geolocation_api_url: None,
            simulate: false,
            simulation_interval: Duration::from_millis(500),
        }
    }
}

fn parsed<T: FromStr>(name: &str, value: &str) -> Result<T, Error> {
    value.trim().parse().map_err(|_| config_error(name))
}

fn parse_bool(name: &str, value: &str) -> Result<bool, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(config_error(name)),
    }
}

impl Config {
    /// Reads the process environment (after `.env`, when present).
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("ROUTES_API_BASE") {
            config.routes_api_base = value;
        }
        if let Some(value) = lookup("CHANNEL_ENDPOINT") {
            config.channel_endpoint = value;
        }
        config.maps_api_key = lookup("GOOGLE_MAPS_API_KEY").filter(|key| !key.is_empty());
        if let Some(value) = lookup("LISTEN_ADDR") {
            config.listen_addr = parsed("LISTEN_ADDR", &value)?;
        }
        if let Some(value) = lookup("MAP_ZOOM") {
            config.map_zoom = parsed("MAP_ZOOM", &value)?;
        }
        if let Some(value) = lookup("DEFAULT_CENTER") {
            config.default_center = parsed("DEFAULT_CENTER", &value)?;
        }
        if let Some(value) = lookup("CURRENT_POSITION") {
            config.current_position = Some(parsed("CURRENT_POSITION", &value)?);
        }
        config.geolocation_api_url = lookup("GEOLOCATION_API_URL").filter(|url| !url.is_empty());
        if let Some(value) = lookup("SIMULATE") {
            config.simulate = parse_bool("SIMULATE", &value)?;
        }
        if let Some(value) = lookup("SIMULATION_INTERVAL_MS") {
            config.simulation_interval =
                Duration::from_millis(parsed("SIMULATION_INTERVAL_MS", &value)?);
        }

        Ok(config)
    }
}
