//! # Hyper Dots
//!
//! Multiplayer dots-and-boxes served as a hypermedia JSON API.
//!
//! ## Features
//!
//! - **Game Engine**: board model, move validation, cell resolution and turn order
//! - **Services**: versioned SQLite persistence, change notifications, game orchestration
//! - **Authentication**: remote hypermedia identity service or local JWT bearer tokens
//! - **Server**: axum router rendering every resource with links and forms
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hyper_dots::{
//!     auth::{JwtConfig, JwtIdentityProvider, JwtManager},
//!     servers::{ApiConfig, ApiServer, AppState},
//!     services::{GameService, Links, NullNotifier, SqliteStore},
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::default();
//! let service = GameService::new(
//!     Arc::new(SqliteStore::open("hyper_dots.db")?),
//!     Arc::new(NullNotifier),
//!     Links::new(&config.base_path),
//! );
//! let identity = JwtIdentityProvider::new(JwtManager::new(JwtConfig::from_env()?));
//! let state = Arc::new(AppState { service, identity: Arc::new(identity) });
//! ApiServer::new(config, state).start().await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Identity providers resolving `Authorization` headers to players
pub mod auth;

/// Core game logic and rules
pub mod game;

/// Logger bootstrap
pub mod logging;

/// HTTP server (router, handlers, hypermedia views)
pub mod servers;

/// Persistence, notifications and orchestration
pub mod services;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::{Game, GameError, GameState, GameStatus, PlayerId};
pub use servers::{ApiConfig, ApiServer, AppState};
pub use services::{GameService, ServiceError, StoreError};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Hyper Dots library
#[derive(Debug, thiserror::Error)]
pub enum HyperDotsError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Identity error: {0}")]
    Identity(#[from] auth::IdentityError),

    #[error("Logging error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HyperDotsError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
