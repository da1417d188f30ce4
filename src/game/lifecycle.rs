// src/game/lifecycle.rs - game creation, roster and move application
//
// Every operation consumes the current records and returns the new ones. Reading and
// persisting them is the caller's job (see services::game_service).

use uuid::Uuid;

use crate::game::board::{CellKey, EdgeKey};
use crate::game::error::GameError;
use crate::game::game::{Game, GameStatus, DEFAULT_DIMENSION, MAX_DIMENSION, MIN_DIMENSION, MIN_PLAYERS};
use crate::game::game_state::GameState;
use crate::game::next_turn::next_turn;
use crate::game::player::PlayerId;
use crate::game::resolve_cells::resolve_claim;
use crate::game::validate_move::validate_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub state: GameState,
    pub claimed: Vec<CellKey>,
    pub scored: bool,
}

// ============================================================================
// CREATION
// ============================================================================

pub fn create_game(
    name: Option<&str>,
    width: Option<i64>,
    height: Option<i64>,
    owner: PlayerId,
) -> Result<Game, GameError> {
    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(GameError::InvalidName)?;

    let width = width.filter(|w| *w > 0).unwrap_or(i64::from(DEFAULT_DIMENSION));
    let height = height.filter(|h| *h > 0).unwrap_or(i64::from(DEFAULT_DIMENSION));

    let invalid = || GameError::InvalidDimensions {
        width,
        height,
        min: MIN_DIMENSION,
        max: MAX_DIMENSION,
    };
    let in_range = |side: u32| (MIN_DIMENSION..=MAX_DIMENSION).contains(&side);
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if in_range(w) && in_range(h) => (w, h),
        _ => return Err(invalid()),
    };

    Ok(Game {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        width: w,
        height: h,
        owner: owner.clone(),
        players: vec![owner],
        status: GameStatus::Waiting,
    })
}

// ============================================================================
// ROSTER
// ============================================================================

pub fn join_game(game: Game, player: &PlayerId) -> Result<(Game, JoinOutcome), GameError> {
    if game.status != GameStatus::Waiting {
        return Err(GameError::GameAlreadyStarted);
    }

    if game.is_player(player) {
        return Ok((game, JoinOutcome::AlreadyJoined));
    }

    let mut game = game;
    game.players.push(player.clone());
    Ok((game, JoinOutcome::Joined))
}

/// Freezes the roster and builds the initial board.
pub fn start_game(game: Game, player: &PlayerId) -> Result<(Game, GameState), GameError> {
    if game.status != GameStatus::Waiting {
        return Err(GameError::GameAlreadyStarted);
    }
    if !game.is_owner(player) {
        return Err(GameError::NotOwner);
    }

    let insufficient = GameError::InsufficientPlayers {
        required: MIN_PLAYERS,
        found: game.players.len(),
    };
    if game.players.len() < MIN_PLAYERS {
        return Err(insufficient);
    }

    let mut game = game;
    game.status = GameStatus::InProgress;
    let state = GameState::initial(&game).ok_or(insufficient)?;
    Ok((game, state))
}

// ============================================================================
// MOVES
// ============================================================================

pub fn apply_move(
    game: &Game,
    state: GameState,
    player: &PlayerId,
    edge: &EdgeKey,
) -> Result<MoveOutcome, GameError> {
    if game.status != GameStatus::InProgress {
        return Err(GameError::GameNotStarted);
    }

    validate_move(&state, player, edge)?;

    let resolution = resolve_claim(state, player, *edge);
    let scored = resolution.scored();
    let mut state = resolution.state;
    state.turn = next_turn(&game.players, player, scored);

    Ok(MoveOutcome {
        state,
        claimed: resolution.claimed,
        scored,
    })
}
