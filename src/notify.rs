use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub route_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn route_finished(route_id: &str, title: &str) -> Self {
        Self {
            route_id: route_id.to_string(),
            message: format!("route {} ({}) finished", title, route_id),
            created_at: Utc::now(),
        }
    }
}

/// User-facing notices. Must not block the caller.
pub trait Notifier {
    fn notify(&self, notification: Notification);

    fn recent(&self) -> Vec<Notification>;
}

/// Logs each notice and keeps the latest `capacity` ones for the operator
/// surface. A capacity of zero only logs.
#[derive(Debug)]
pub struct FeedNotifier {
    capacity: usize,
    feed: Mutex<VecDeque<Notification>>,
}

impl FeedNotifier {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            feed: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }
}

impl Default for FeedNotifier {
    fn default() -> Self {
        Self::new(50)
    }
}

impl Notifier for FeedNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(route_id = %notification.route_id, "{}", notification.message);

        if let Ok(mut feed) = self.feed.lock() {
            feed.push_back(notification);
            while feed.len() > self.capacity {
                feed.pop_front();
            }
        }
    }

    fn recent(&self) -> Vec<Notification> {
        match self.feed.lock() {
            Ok(feed) => feed.iter().cloned().collect(),
            Err(_) => vec![],
        }
    }
}
