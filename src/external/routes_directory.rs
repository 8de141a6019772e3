use async_trait::async_trait;

use crate::{
    entities::Route,
    error::{invalid_input_error, upstream_error, Error},
};

#[async_trait]
pub trait RoutesDirectory {
    async fn fetch_routes(&self) -> Result<Vec<Route>, Error>;
}

#[derive(Clone, Debug)]
pub struct HttpRoutesDirectory {
    client: reqwest::Client,
    api_base: String,
}

impl HttpRoutesDirectory {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/routes", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl RoutesDirectory for HttpRoutesDirectory {
    #[tracing::instrument(skip(self), fields(api_base = %self.api_base))]
    async fn fetch_routes(&self) -> Result<Vec<Route>, Error> {
        let res = self.client.get(self.url()).send().await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let routes: Vec<Route> = res.json().await?;

        tracing::info!("fetched {} routes", routes.len());

        Ok(routes)
    }
}
