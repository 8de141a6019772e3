pub mod geolocation;
pub mod routes_directory;
