use serde::{Deserialize, Serialize};

use crate::entities::LatLng;

/// Frames pushed by the server, `{"event": ..., "data": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    NewPosition { route_id: String, path: LatLng },
    #[serde(rename_all = "camelCase")]
    FinishedRoute { route_id: String },
}

impl ServerEvent {
    pub fn route_id(&self) -> &str {
        match self {
            Self::NewPosition { route_id, path: _ } => route_id,
            Self::FinishedRoute { route_id } => route_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientCommand {
    #[serde(rename_all = "camelCase")]
    GetDirections { route_id: String },
}
