// HTTP surface: hypermedia views over the game service
pub mod api;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod hypermedia;

// Re-export public APIs
pub use api::{api_router, ApiConfig, ApiServer, AppState};
pub use error::ApiError;
