use serde::{Deserialize, Serialize};

use crate::entities::LatLng;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub title: String,
    pub start_position: LatLng,
    pub end_position: LatLng,
    #[serde(default)]
    pub points: Vec<LatLng>,
}
