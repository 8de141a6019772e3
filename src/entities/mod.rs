mod directory;
mod location;
mod route;
mod session;

pub use directory::{Directory, Selection};
pub use location::LatLng;
pub use route::Route;
pub use session::{Session, Status as SessionStatus};
