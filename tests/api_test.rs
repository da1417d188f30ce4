//! HTTP flows driven through the axum router without binding a socket

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use hyper_dots::auth::{JwtConfig, JwtIdentityProvider, JwtManager};
use hyper_dots::servers::{ApiConfig, ApiServer, AppState};
use hyper_dots::services::{GameService, Links, NullNotifier, SqliteStore};
use hyper_dots::PlayerId;

const ALICE: &str = "https://id.example.com/users/alice";
const BOB: &str = "https://id.example.com/users/bob";

struct TestApp {
    router: Router,
    jwt: JwtManager,
}

impl TestApp {
    fn new() -> Self {
        let jwt = JwtManager::new(JwtConfig::new("api-test-secret".to_string(), 1));
        let config = ApiConfig::default();
        let service = GameService::new(
            Arc::new(SqliteStore::in_memory().unwrap()),
            Arc::new(NullNotifier),
            Links::new(&config.base_path),
        );
        let state = Arc::new(AppState {
            service,
            identity: Arc::new(JwtIdentityProvider::new(jwt.clone())),
        });
        Self {
            router: ApiServer::new(config, state).router(),
            jwt,
        }
    }

    fn bearer(&self, player: &str) -> String {
        let token = self
            .jwt
            .create_token(&PlayerId::new(player), Some(player.rsplit('/').next().unwrap()))
            .unwrap();
        format!("Bearer {}", token)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, location, body)
    }

    async fn get(&self, player: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri)
            .header(header::AUTHORIZATION, self.bearer(player))
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = self.send(request).await;
        (status, body)
    }

    async fn post_json(&self, player: &str, uri: &str, body: Value) -> (StatusCode, Option<String>, Value) {
        let request = Request::post(uri)
            .header(header::AUTHORIZATION, self.bearer(player))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn post_form(&self, player: &str, uri: &str, body: &str) -> (StatusCode, Option<String>, Value) {
        let request = Request::post(uri)
            .header(header::AUTHORIZATION, self.bearer(player))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Creates a 4x4 game owned by Alice, joined by Bob, and started.
    async fn started_game(&self) -> String {
        let (_, location, _) = self
            .post_json(ALICE, "/api/games", serde_json::json!({"name": "duel", "width": 4, "height": 4}))
            .await;
        let game = location.unwrap();
        self.post_form(BOB, &game, "_action=join").await;
        self.post_form(ALICE, &game, "_action=start").await;
        game
    }
}

fn user_href(player: &str) -> String {
    format!("/api/users/{}", PlayerId::new(player).to_path_segment())
}

// ============================================================================
// AUTHENTICATION
// ============================================================================

#[tokio::test]
async fn test_requests_without_credentials_are_unauthorized() {
    let app = TestApp::new();
    let request = Request::get("/api/games").body(Body::empty()).unwrap();
    let (status, _, body) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();
    let request = Request::get("/api")
        .header(header::AUTHORIZATION, "Bearer not-a-token")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_root_links_account_and_games() {
    let app = TestApp::new();
    let (status, body) = app.get(ALICE, "/api").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["href"], "/api");
    assert_eq!(body["games"]["href"], "/api/games");
    assert_eq!(body["account"]["href"], user_href(ALICE));
}

// ============================================================================
// GAMES
// ============================================================================

#[tokio::test]
async fn test_create_game_redirects_to_new_game() {
    let app = TestApp::new();
    let (status, location, _) = app
        .post_form(ALICE, "/api/games", "name=Friday+night&width=5&height=")
        .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.unwrap();
    assert!(location.starts_with("/api/games/"));

    let (status, game) = app.get(ALICE, &location).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["name"], "Friday night");
    assert_eq!(game["width"], 5);
    assert_eq!(game["height"], 9);
    assert_eq!(game["status"], "waiting");
    assert_eq!(game["owner"]["href"], user_href(ALICE));
    assert!(game.get("join").is_none());
    assert!(game.get("start").is_none());
    assert_eq!(game["chat"]["href"], format!("{}/chat", location));

    let (_, games) = app.get(BOB, "/api/games").await;
    assert_eq!(games["data"].as_array().unwrap().len(), 1);
    assert_eq!(games["open"][0]["href"], location);
    assert_eq!(games["create"]["input"]["width"]["min"], 4);
}

#[tokio::test]
async fn test_create_game_with_small_board_is_bad_request() {
    let app = TestApp::new();
    let (status, location, body) = app
        .post_json(ALICE, "/api/games", serde_json::json!({"name": "tiny", "width": 2}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(location.is_none());
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_unknown_game_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app.get(ALICE, "/api/games/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_join_and_start_forms_follow_roster() {
    let app = TestApp::new();
    let (_, location, _) = app
        .post_json(ALICE, "/api/games", serde_json::json!({"name": "duel"}))
        .await;
    let game = location.unwrap();

    let (_, view) = app.get(BOB, &game).await;
    assert_eq!(view["join"]["input"]["_action"]["value"], "join");
    assert!(view.get("chat").is_none());

    let (status, redirect, _) = app.post_form(BOB, &game, "_action=join").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(redirect.as_deref(), Some(game.as_str()));

    let (status, _, _) = app.post_form(BOB, &game, "_action=join").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, view) = app.get(ALICE, &game).await;
    assert_eq!(view["players"].as_array().unwrap().len(), 2);
    assert_eq!(view["start"]["input"]["_action"]["value"], "start");

    let (status, _, _) = app.post_form(BOB, &game, "_action=start").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = app.post_form(ALICE, &game, "_action=dance").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = app.post_form(ALICE, &game, "_action=start").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, view) = app.get(ALICE, &game).await;
    assert_eq!(view["status"], "in-progress");
    assert_eq!(view["state"]["href"], format!("{}/state", game));
    assert!(view.get("start").is_none());
}

// ============================================================================
// STATE
// ============================================================================

#[tokio::test]
async fn test_state_offers_moves_to_turn_holder_only() {
    let app = TestApp::new();
    let game = app.started_game().await;
    let state_uri = format!("{}/state", game);

    let (status, state) = app.get(ALICE, &state_uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["turn"]["href"], user_href(ALICE));
    assert_eq!(state["complete"], false);

    let edges = state["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 40);
    assert!(edges.iter().all(|e| e.get("occupy").is_some()));
    assert_eq!(state["cells"].as_array().unwrap().len(), 16);

    let (_, state) = app.get(BOB, &state_uri).await;
    let edges = state["edges"].as_array().unwrap();
    assert!(edges.iter().all(|e| e.get("occupy").is_none()));
}

#[tokio::test]
async fn test_moves_close_a_cell() {
    let app = TestApp::new();
    let game = app.started_game().await;
    let state_uri = format!("{}/state", game);

    for (player, position) in [(ALICE, "0h0"), (BOB, "0v0"), (ALICE, "1h0")] {
        let (status, redirect, _) = app
            .post_form(player, &state_uri, &format!("position={}", position))
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(redirect.as_deref(), Some(state_uri.as_str()));
    }

    let (status, _, _) = app
        .post_json(BOB, &state_uri, serde_json::json!({"position": "0v1"}))
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, state) = app.get(BOB, &state_uri).await;
    assert_eq!(state["turn"]["href"], user_href(BOB));
    assert_eq!(state["cells"][0]["owner"]["href"], user_href(BOB));
    assert_eq!(state["scores"][0]["player"]["href"], user_href(ALICE));
    assert_eq!(state["scores"][0]["score"], 0);
    assert_eq!(state["scores"][1]["score"], 1);

    let free = state["edges"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e.get("occupy").is_some())
        .count();
    assert_eq!(free, 36);
}

#[tokio::test]
async fn test_rejected_moves() {
    let app = TestApp::new();
    let game = app.started_game().await;
    let state_uri = format!("{}/state", game);

    let (status, _, _) = app.post_form(BOB, &state_uri, "position=0h0").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = app.post_form(ALICE, &state_uri, "position=9h9").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    app.post_form(ALICE, &state_uri, "position=0h0").await;
    let (status, _, _) = app.post_form(BOB, &state_uri, "position=0h0").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

// ============================================================================
// CHAT AND USERS
// ============================================================================

#[tokio::test]
async fn test_chat_is_for_players() {
    let app = TestApp::new();
    let game = app.started_game().await;
    let chat_uri = format!("{}/chat", game);

    let (status, redirect, _) = app.post_form(ALICE, &chat_uri, "content=good+luck").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(redirect.as_deref(), Some(chat_uri.as_str()));

    let (status, _, _) = app.post_form("https://id.example.com/users/eve", &chat_uri, "content=hi").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = app.post_form(BOB, &chat_uri, "content=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, chat) = app.get(BOB, &chat_uri).await;
    assert_eq!(chat["data"].as_array().unwrap().len(), 1);
    assert_eq!(chat["data"][0]["content"], "good luck");
    assert_eq!(chat["data"][0]["author"]["href"], user_href(ALICE));
    assert_eq!(chat["message"]["input"]["content"]["required"], true);
}

#[tokio::test]
async fn test_user_profiles() {
    let app = TestApp::new();

    let (status, me) = app.get(ALICE, &user_href(ALICE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "alice");
    assert_eq!(me["color"], PlayerId::new(ALICE).color());

    let (status, other) = app.get(ALICE, &user_href(BOB)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(other["href"], user_href(BOB));
    assert!(other.get("name").is_none());

    let (status, _) = app.get(ALICE, "/api/users/not*base64").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
