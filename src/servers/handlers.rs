use axum::{
    extract::{Path, State},
    response::{Json, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;

use super::api::AppState;
use super::error::ApiError;
use super::extract::{lenient_number, CurrentPlayer, Payload};
use super::hypermedia::{
    render_chat, render_game, render_games, render_root, render_state, render_user, ChatView,
    GameView, GamesView, RootView, StateView, UserView,
};
use crate::game::PlayerId;

// ============================================================================
// REQUEST BODIES
// ============================================================================

#[derive(Deserialize, Debug, Default)]
pub struct CreateGameRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct GameActionRequest {
    #[serde(rename = "_action")]
    pub action: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MoveRequest {
    pub position: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ChatRequest {
    pub content: Option<String>,
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn root(State(state): State<Arc<AppState>>, player: CurrentPlayer) -> Json<RootView> {
    Json(render_root(state.service.links(), &player.profile.id))
}

pub async fn list_games(
    State(state): State<Arc<AppState>>,
    _player: CurrentPlayer,
) -> Result<Json<GamesView>, ApiError> {
    let games = state.service.list_games()?;
    Ok(Json(render_games(state.service.links(), &games)))
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    player: CurrentPlayer,
    Payload(request): Payload<CreateGameRequest>,
) -> Result<Redirect, ApiError> {
    let game = state.service.create_game(
        &player.profile.id,
        request.name.as_deref(),
        request.width,
        request.height,
    )?;
    Ok(Redirect::to(&state.service.links().game(&game.id)))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    player: CurrentPlayer,
    Path(game_id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let game = state.service.get_game(&game_id)?;
    Ok(Json(render_game(state.service.links(), &game, &player.profile.id)))
}

/// `_action` is either `join` or `start`.
pub async fn game_action(
    State(state): State<Arc<AppState>>,
    player: CurrentPlayer,
    Path(game_id): Path<String>,
    Payload(request): Payload<GameActionRequest>,
) -> Result<Redirect, ApiError> {
    let action = request.action.unwrap_or_default();
    let game = state
        .service
        .perform_action(&game_id, &player.profile.id, action.trim())?;
    Ok(Redirect::to(&state.service.links().game(&game.id)))
}

pub async fn get_state(
    State(state): State<Arc<AppState>>,
    player: CurrentPlayer,
    Path(game_id): Path<String>,
) -> Result<Json<StateView>, ApiError> {
    let (game, game_state) = state.service.get_state(&game_id)?;
    Ok(Json(render_state(
        state.service.links(),
        &game,
        &game_state,
        &player.profile.id,
    )))
}

pub async fn play_move(
    State(state): State<Arc<AppState>>,
    player: CurrentPlayer,
    Path(game_id): Path<String>,
    Payload(request): Payload<MoveRequest>,
) -> Result<Redirect, ApiError> {
    let position = request
        .position
        .ok_or_else(|| ApiError::bad_request("missing position parameter"))?;
    state
        .service
        .play_move(&game_id, &player.profile.id, &position)?;
    Ok(Redirect::to(&state.service.links().state(&game_id)))
}

pub async fn get_chat(
    State(state): State<Arc<AppState>>,
    _player: CurrentPlayer,
    Path(game_id): Path<String>,
) -> Result<Json<ChatView>, ApiError> {
    let messages = state.service.list_messages(&game_id)?;
    Ok(Json(render_chat(state.service.links(), &game_id, &messages)))
}

pub async fn post_chat(
    State(state): State<Arc<AppState>>,
    player: CurrentPlayer,
    Path(game_id): Path<String>,
    Payload(request): Payload<ChatRequest>,
) -> Result<Redirect, ApiError> {
    state
        .service
        .post_message(&game_id, &player.profile.id, request.content.as_deref())?;
    Ok(Redirect::to(&state.service.links().chat(&game_id)))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    player: CurrentPlayer,
    Path(segment): Path<String>,
) -> Result<Json<UserView>, ApiError> {
    let user = PlayerId::from_path_segment(&segment)
        .ok_or_else(|| ApiError::not_found(format!("user {} not found", segment)))?;

    let profile = if user == player.profile.id {
        player.profile
    } else {
        state
            .identity
            .profile(&player.authorization, &user)
            .await?
    };
    Ok(Json(render_user(state.service.links(), &profile)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_numeric_strings() {
        let request: CreateGameRequest =
            serde_json::from_str(r#"{"name": "Friday night", "width": "5", "height": "wide"}"#)
                .unwrap();
        assert_eq!(request.name.as_deref(), Some("Friday night"));
        assert_eq!(request.width, Some(5));
        assert_eq!(request.height, None);
    }

    #[test]
    fn test_action_field_is_underscored() {
        let request: GameActionRequest = serde_json::from_str(r#"{"_action": "join"}"#).unwrap();
        assert_eq!(request.action.as_deref(), Some("join"));
    }
}
