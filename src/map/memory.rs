use std::collections::HashMap;

use uuid::Uuid;

use super::{
    ColorPicker, Icon, MapHandle, MapOptions, MapSnapshot, MapSurface, Marker, MarkerOptions,
    Path, Symbol,
};
use crate::entities::LatLng;
use crate::error::{invalid_state_error, Error};

/// Map state kept in process. Front ends render it from `snapshot()`.
#[derive(Debug)]
pub struct InMemoryMap {
    handle: Option<MapHandle>,
    options: Option<MapOptions>,
    api_key: Option<String>,
    colors: ColorPicker,
    paths: HashMap<String, Path>,
}

impl InMemoryMap {
    pub fn new(api_key: Option<String>, colors: ColorPicker) -> Self {
        Self {
            handle: None,
            options: None,
            api_key,
            colors,
            paths: HashMap::new(),
        }
    }

    pub fn path(&self, route_id: &str) -> Option<&Path> {
        self.paths.get(route_id)
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }
}

fn marker(options: MarkerOptions, color: &str) -> Marker {
    Marker {
        title: options.title,
        position: options.position,
        icon: Icon {
            symbol: options.symbol,
            color: color.to_string(),
        },
    }
}

impl MapSurface for InMemoryMap {
    #[tracing::instrument(skip(self))]
    fn initialize(&mut self, options: MapOptions) -> Result<MapHandle, Error> {
        if self.handle.is_some() {
            tracing::warn!("map surface already initialized");
            return Err(invalid_state_error());
        }

        let handle = MapHandle(Uuid::new_v4());
        self.handle = Some(handle);
        self.options = Some(options);

        Ok(handle)
    }

    fn add_path(&mut self, route_id: &str, start: MarkerOptions, end: MarkerOptions) {
        let color = self.colors.pick();

        let current = Marker {
            title: start.title.clone(),
            position: start.position,
            icon: Icon {
                symbol: Symbol::Current,
                color: color.clone(),
            },
        };

        let path = Path {
            route_id: route_id.to_string(),
            start: marker(start, &color),
            end: marker(end, &color),
            current,
            color,
        };

        if self.paths.insert(route_id.to_string(), path).is_some() {
            tracing::debug!(route_id, "replaced existing path");
        } else {
            tracing::debug!(route_id, "added path");
        }
    }

    fn move_current_marker(&mut self, route_id: &str, position: LatLng) {
        match self.paths.get_mut(route_id) {
            Some(path) => {
                path.current.position = position;
                tracing::debug!(route_id, %position, "moved current marker");
            }
            None => tracing::debug!(route_id, "no path to move, ignoring"),
        }
    }

    fn remove_path(&mut self, route_id: &str) {
        if self.paths.remove(route_id).is_some() {
            tracing::debug!(route_id, "removed path");
        }
    }

    fn snapshot(&self) -> MapSnapshot {
        let mut paths: Vec<Path> = self.paths.values().cloned().collect();
        paths.sort_by(|a, b| a.route_id.cmp(&b.route_id));

        MapSnapshot {
            handle: self.handle,
            options: self.options.clone(),
            api_key: self.api_key.clone(),
            paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> InMemoryMap {
        InMemoryMap::new(None, ColorPicker::seeded(1))
    }

    fn start(position: LatLng) -> MarkerOptions {
        MarkerOptions {
            title: "start".into(),
            position,
            symbol: Symbol::Vehicle,
        }
    }

    fn end(position: LatLng) -> MarkerOptions {
        MarkerOptions {
            title: "end".into(),
            position,
            symbol: Symbol::Destination,
        }
    }

    #[test]
    fn initializes_once() {
        let mut map = map();
        let options = MapOptions {
            zoom: 15,
            center: LatLng::new(0.0, 0.0),
        };

        assert!(map.initialize(options.clone()).is_ok());
        assert_eq!(map.initialize(options).unwrap_err().code, 100);
    }

    #[test]
    fn current_marker_starts_at_start_and_moves() {
        let mut map = map();
        map.add_path("r1", start(LatLng::new(0.0, 0.0)), end(LatLng::new(1.0, 1.0)));

        let path = map.path("r1").unwrap();
        assert_eq!(path.current.position, LatLng::new(0.0, 0.0));
        assert_eq!(path.start.icon.color, path.end.icon.color);
        assert_eq!(path.start.icon.symbol, Symbol::Vehicle);
        assert_eq!(path.end.icon.symbol, Symbol::Destination);

        map.move_current_marker("r1", LatLng::new(0.5, 0.5));
        assert_eq!(
            map.path("r1").unwrap().current.position,
            LatLng::new(0.5, 0.5)
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut map = map();

        map.move_current_marker("ghost", LatLng::new(1.0, 1.0));
        map.remove_path("ghost");

        assert_eq!(map.path_count(), 0);
    }

    #[test]
    fn one_path_per_route() {
        let mut map = map();
        map.add_path("r1", start(LatLng::new(0.0, 0.0)), end(LatLng::new(1.0, 1.0)));
        map.add_path("r1", start(LatLng::new(2.0, 2.0)), end(LatLng::new(3.0, 3.0)));
        map.add_path("r2", start(LatLng::new(0.0, 0.0)), end(LatLng::new(1.0, 1.0)));

        assert_eq!(map.path_count(), 2);
        assert_eq!(map.path("r1").unwrap().start.position, LatLng::new(2.0, 2.0));

        map.remove_path("r1");
        let snapshot = map.snapshot();
        assert_eq!(snapshot.paths.len(), 1);
        assert_eq!(snapshot.paths[0].route_id, "r2");
    }
}
