use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::{Route, Session};
use crate::error::Error;
use crate::map::MapSnapshot;
use crate::notify::Notification;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteListing {
    pub routes: Vec<Route>,
    pub selected: Option<String>,
    pub can_submit: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChannelStatus {
    pub connected: bool,
}

#[async_trait]
pub trait RouteAPI {
    async fn list_routes(&self) -> Result<RouteListing, Error>;
    async fn select_route(&self, route_id: Option<String>) -> Result<RouteListing, Error>;
}

#[async_trait]
pub trait SessionAPI {
    async fn start_session(&self) -> Result<Session, Error>;
    async fn find_session(&self, route_id: String) -> Result<Session, Error>;
    async fn list_sessions(&self) -> Result<Vec<Session>, Error>;
    async fn connect_channel(&self) -> Result<ChannelStatus, Error>;
}

#[async_trait]
pub trait MapAPI {
    async fn map_snapshot(&self) -> Result<MapSnapshot, Error>;
    async fn list_notifications(&self) -> Result<Vec<Notification>, Error>;
}

pub trait API: RouteAPI + SessionAPI + MapAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
