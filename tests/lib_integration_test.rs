//! Integration tests for the Hyper Dots library public API

use hyper_dots::{
    servers::{ApiConfig, ApiServer, AppState},
    GameError, HyperDotsError, Result, ServiceError, DESCRIPTION, NAME, VERSION,
};
use std::sync::Arc;

use hyper_dots::auth::{JwtConfig, JwtIdentityProvider, JwtManager};
use hyper_dots::services::{GameService, Links, NullNotifier, SqliteStore};

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "hyper_dots");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_error_types() {
    let game_error = HyperDotsError::from(GameError::NotYourTurn);
    assert!(matches!(game_error, HyperDotsError::Game(GameError::NotYourTurn)));

    let service_error = HyperDotsError::from(ServiceError::NotAPlayer);
    assert!(matches!(service_error, HyperDotsError::Service(_)));

    let io_error = HyperDotsError::from(std::io::Error::other("disk"));
    assert!(io_error.to_string().contains("disk"));
}

#[test]
fn test_api_server_creation() {
    let config = ApiConfig {
        port: 8080,
        host: "127.0.0.1".to_string(),
        base_path: "/api".to_string(),
    };

    let service = GameService::new(
        Arc::new(SqliteStore::in_memory().unwrap()),
        Arc::new(NullNotifier),
        Links::new(&config.base_path),
    );
    let identity = JwtIdentityProvider::new(JwtManager::new(JwtConfig::new("s".to_string(), 1)));
    let state = Arc::new(AppState {
        service,
        identity: Arc::new(identity),
    });

    let _router = ApiServer::new(config.clone(), state).router();
}

#[test]
fn test_result_type_alias() {
    let success: Result<i32> = Ok(42);
    assert_eq!(success.unwrap(), 42);

    let failure: Result<i32> = Err(GameError::GameNotStarted.into());
    assert!(failure.is_err());
}
