pub mod app;
pub mod errors;
pub mod extractors;
mod routes;

pub use app::{build_app, cors_layer, run_server, AppState};
pub use errors::{ApiError, ApiResponse};
