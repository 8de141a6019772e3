mod memory;
mod palette;

pub use memory::InMemoryMap;
pub use palette::{ColorPicker, PALETTE};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::LatLng;
use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    pub zoom: u8,
    pub center: LatLng,
}

/// Identifies an initialized surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapHandle(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Vehicle,
    Destination,
    Current,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    pub symbol: Symbol,
    pub color: String,
}

/// Marker requested by the caller, before the surface assigns a color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    pub title: String,
    pub position: LatLng,
    pub symbol: Symbol,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub title: String,
    pub position: LatLng,
    pub icon: Icon,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub route_id: String,
    pub color: String,
    pub start: Marker,
    pub end: Marker,
    pub current: Marker,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub handle: Option<MapHandle>,
    pub options: Option<MapOptions>,
    pub api_key: Option<String>,
    pub paths: Vec<Path>,
}

/// Rendering surface holding the markers of every active path.
pub trait MapSurface {
    fn initialize(&mut self, options: MapOptions) -> Result<MapHandle, Error>;

    fn add_path(&mut self, route_id: &str, start: MarkerOptions, end: MarkerOptions);

    /// No-op when `route_id` has no path.
    fn move_current_marker(&mut self, route_id: &str, position: LatLng);

    /// No-op when `route_id` has no path.
    fn remove_path(&mut self, route_id: &str);

    fn snapshot(&self) -> MapSnapshot;
}
