use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::auth::IdentityProvider;
use crate::services::GameService;

/// Shared by every request handler.
pub struct AppState {
    pub service: GameService,
    pub identity: Arc<dyn IdentityProvider>,
}

// Server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub base_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            base_path: "/api".to_string(),
        }
    }
}

/// Routes relative to the base path.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/games",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route(
            "/games/{game}",
            get(handlers::get_game).post(handlers::game_action),
        )
        .route(
            "/games/{game}/state",
            get(handlers::get_state).post(handlers::play_move),
        )
        .route(
            "/games/{game}/chat",
            get(handlers::get_chat).post(handlers::post_chat),
        )
        .route("/users/{user}", get(handlers::get_user))
        .with_state(state)
}

pub struct ApiServer {
    config: ApiConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    pub fn router(&self) -> Router {
        let api = api_router(self.state.clone());
        let base = self.config.base_path.trim_end_matches('/');

        let app = if base.is_empty() {
            api
        } else {
            Router::new().nest(base, api)
        };

        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    }

    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let listener = TcpListener::bind(addr).await?;

        log::info!(
            "🌐 hyper_dots API listening on http://{}{}",
            addr,
            self.config.base_path
        );

        axum::serve(listener, app).await?;
        Ok(())
    }
}
