use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    entities::LatLng,
    error::{geolocation_unavailable_error, upstream_error, Error},
};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
}

#[async_trait]
pub trait Geolocation {
    async fn current_position(&self, options: PositionOptions) -> Result<LatLng, Error>;
}

/// Device position known ahead of time, e.g. from configuration.
#[derive(Clone, Debug, Default)]
pub struct FixedGeolocation {
    position: Option<LatLng>,
}

impl FixedGeolocation {
    pub fn new(position: Option<LatLng>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocation for FixedGeolocation {
    async fn current_position(&self, _: PositionOptions) -> Result<LatLng, Error> {
        self.position.ok_or_else(geolocation_unavailable_error)
    }
}

#[derive(Clone, Debug, Deserialize)]
struct IpLookup {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// IP based lookup against an ip-api.com compatible endpoint.
#[derive(Clone, Debug)]
pub struct HttpGeolocation {
    client: reqwest::Client,
    url: String,
}

impl HttpGeolocation {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Geolocation for HttpGeolocation {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn current_position(&self, options: PositionOptions) -> Result<LatLng, Error> {
        if options.enable_high_accuracy {
            tracing::debug!("high accuracy requested, ip lookup is city level at best");
        }

        let res = self.client.get(&self.url).send().await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let data: IpLookup = res.json().await?;

        match (data.status.as_str(), data.lat, data.lon) {
            ("success", Some(lat), Some(lng)) => Ok(LatLng { lat, lng }),
            _ => Err(geolocation_unavailable_error()),
        }
    }
}

/// Resolves the initial map center, falling back to `fallback` when the
/// provider cannot produce a position.
pub async fn locate<G: Geolocation + ?Sized>(geolocation: &G, fallback: LatLng) -> LatLng {
    let options = PositionOptions {
        enable_high_accuracy: true,
    };

    match geolocation.current_position(options).await {
        Ok(position) => position,
        Err(err) => {
            tracing::warn!("geolocation unavailable ({}), centering on {}", err, fallback);
            fallback
        }
    }
}
