pub mod channel;
pub mod map;
pub mod routes;
pub mod sessions;
