pub mod comments;
pub mod error;
pub mod extract;
pub mod forums;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, AppStateInner};
