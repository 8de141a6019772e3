use std::sync::Arc;

use crate::entities::Route;
use crate::error::{invalid_input_error, Error};

/// Result set of the route directory, fetched once at startup.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    routes: Vec<Arc<Route>>,
}

impl Directory {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes: routes.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    pub fn find(&self, route_id: &str) -> Option<&Arc<Route>> {
        self.routes.iter().find(|route| route.id == route_id)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Selection {
    route: Option<Arc<Route>>,
}

impl Selection {
    pub fn selected(&self) -> Option<&Arc<Route>> {
        self.route.as_ref()
    }

    pub fn select(&mut self, directory: &Directory, route_id: &str) -> Result<(), Error> {
        let route = directory.find(route_id).ok_or_else(invalid_input_error)?;
        self.route = Some(route.clone());

        Ok(())
    }

    pub fn clear(&mut self) {
        self.route = None;
    }
}
