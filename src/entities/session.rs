use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{LatLng, Route};
use crate::error::{invalid_state_error, Error};

/// Live-tracking lifecycle of one submitted route.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub route_id: String,
    pub route_title: String,
    pub status: Status,
    pub started_at: DateTime<Utc>,
    pub last_position: Option<LatLng>,
    pub positions_received: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    Idle,
    Active,
    Completed { finished_at: DateTime<Utc> },
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Idle => "idle".into(),
            Self::Active => "active".into(),
            Self::Completed { finished_at: _ } => "completed".into(),
        }
    }
}

impl Session {
    pub fn new(route: &Route) -> Self {
        Self {
            id: Uuid::new_v4(),
            route_id: route.id.clone(),
            route_title: route.title.clone(),
            status: Status::Idle,
            started_at: Utc::now(),
            last_position: None,
            positions_received: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, Status::Active)
    }

    #[tracing::instrument(skip(self), fields(route_id = %self.route_id))]
    pub fn activate(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Idle => {
                self.status = Status::Active;
                self.started_at = Utc::now();
                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    pub fn record_position(&mut self, position: LatLng) -> Result<(), Error> {
        match self.status {
            Status::Active => {
                self.last_position = Some(position);
                self.positions_received += 1;
                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }

    #[tracing::instrument(skip(self), fields(route_id = %self.route_id))]
    pub fn complete(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Active => {
                self.status = Status::Completed {
                    finished_at: Utc::now(),
                };
                Ok(())
            }
            _ => Err(invalid_state_error()),
        }
    }
}
