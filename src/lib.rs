pub mod api;
pub mod channel;
pub mod config;
pub mod entities;
pub mod error;
pub mod external;
pub mod map;
pub mod notify;
pub mod server;
pub mod startup;
pub mod tracker;
