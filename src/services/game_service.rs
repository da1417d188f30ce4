// src/services/game_service.rs - read, transition, conditional write, notify
//
// One public method per HTTP action. Each performs at most one conditional write, so a
// concurrent writer on the same game surfaces as StoreError::Conflict instead of a lost
// update. Rules live in crate::game; this layer only moves records in and out.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::links::Links;
use super::notifier::Notifier;
use super::store::{ChatMessage, GameStore, Versioned};
use super::ServiceError;
use crate::game::{
    apply_move, create_game, join_game, parse_edge_key, start_game, Game, GameError, GameState,
    GameStatus, JoinOutcome, MoveOutcome, PlayerId,
};

/// Discriminator carried by the `_action` field on the game resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Join,
    Start,
}

impl GameAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "join" => Some(GameAction::Join),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct GameService {
    store: Arc<dyn GameStore>,
    notifier: Arc<dyn Notifier>,
    links: Links,
}

impl GameService {
    pub fn new(store: Arc<dyn GameStore>, notifier: Arc<dyn Notifier>, links: Links) -> Self {
        Self {
            store,
            notifier,
            links,
        }
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    // ============================================================================
    // GAMES
    // ============================================================================

    pub fn list_games(&self) -> Result<Vec<Game>, ServiceError> {
        Ok(self.store.list_games()?)
    }

    pub fn get_game(&self, game_id: &str) -> Result<Game, ServiceError> {
        Ok(self.load_game(game_id)?.record)
    }

    pub fn create_game(
        &self,
        owner: &PlayerId,
        name: Option<&str>,
        width: Option<i64>,
        height: Option<i64>,
    ) -> Result<Game, ServiceError> {
        let game = create_game(name, width, height, owner.clone())?;
        self.store.insert_game(&game)?;

        log::info!(
            "🎲 game {} ({}x{}) created by {}",
            game.id,
            game.width,
            game.height,
            owner
        );
        self.notifier.notify(&self.links.game(&game.id));
        self.notifier.notify(&self.links.games());
        Ok(game)
    }

    pub fn perform_action(
        &self,
        game_id: &str,
        player: &PlayerId,
        action: &str,
    ) -> Result<Game, ServiceError> {
        match GameAction::parse(action) {
            Some(GameAction::Join) => self.join_game(game_id, player),
            Some(GameAction::Start) => self.start_game(game_id, player).map(|(game, _)| game),
            None => Err(ServiceError::InvalidAction(action.to_string())),
        }
    }

    pub fn join_game(&self, game_id: &str, player: &PlayerId) -> Result<Game, ServiceError> {
        let Versioned { version, record } = self.load_game(game_id)?;
        let (game, outcome) = join_game(record, player)?;

        if outcome == JoinOutcome::AlreadyJoined {
            log::debug!("{} already plays in game {}", player, game_id);
            return Ok(game);
        }

        self.store.update_game(&game, version)?;
        log::info!("👋 {} joined game {} ({} players)", player, game_id, game.players.len());
        self.notifier.notify(&self.links.game(game_id));
        Ok(game)
    }

    pub fn start_game(
        &self,
        game_id: &str,
        player: &PlayerId,
    ) -> Result<(Game, GameState), ServiceError> {
        let Versioned { version, record } = self.load_game(game_id)?;
        let (game, state) = start_game(record, player)?;

        self.store.start_game(&game, version, &state)?;
        log::info!(
            "🚀 game {} started with {} players, {} to move",
            game_id,
            game.players.len(),
            state.turn
        );
        self.notifier.notify(&self.links.game(game_id));
        Ok((game, state))
    }

    // ============================================================================
    // STATE
    // ============================================================================

    pub fn get_state(&self, game_id: &str) -> Result<(Game, GameState), ServiceError> {
        let game = self.load_game(game_id)?.record;
        let state = self.load_state(game_id)?.record;
        Ok((game, state))
    }

    /// Claims the edge named by `position` (e.g. `"3h0"`) for `player`.
    pub fn play_move(
        &self,
        game_id: &str,
        player: &PlayerId,
        position: &str,
    ) -> Result<MoveOutcome, ServiceError> {
        let game = self.load_game(game_id)?.record;
        if game.status != GameStatus::InProgress {
            return Err(GameError::GameNotStarted.into());
        }

        let edge = parse_edge_key(position.trim())
            .map_err(|_| GameError::UnknownEdge(position.to_string()))?;
        let Versioned { version, record } = self.load_state(game_id)?;

        let outcome = apply_move(&game, record, player, &edge)?;
        self.store.update_state(&outcome.state, version)?;

        if outcome.scored {
            log::info!(
                "✅ {} claimed {} in game {} and closed {} cell(s), score {}",
                player,
                edge,
                game_id,
                outcome.claimed.len(),
                outcome.state.score_of(player)
            );
        } else {
            log::info!("{} claimed {} in game {}, {} to move", player, edge, game_id, outcome.state.turn);
        }
        if outcome.state.is_complete() {
            log::info!("🏁 game {} board complete, leaders: {:?}", game_id, outcome.state.leaders());
        }

        self.notifier.notify(&self.links.state(game_id));
        Ok(outcome)
    }

    // ============================================================================
    // CHAT
    // ============================================================================

    pub fn list_messages(&self, game_id: &str) -> Result<Vec<ChatMessage>, ServiceError> {
        self.load_game(game_id)?;
        Ok(self.store.list_messages(game_id)?)
    }

    pub fn post_message(
        &self,
        game_id: &str,
        author: &PlayerId,
        content: Option<&str>,
    ) -> Result<ChatMessage, ServiceError> {
        let content = content
            .filter(|c| !c.trim().is_empty())
            .ok_or(ServiceError::MissingParameter("content"))?;

        let game = self.load_game(game_id)?.record;
        if !game.is_player(author) {
            return Err(ServiceError::NotAPlayer);
        }

        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            author: author.clone(),
            content: content.to_string(),
            date: Utc::now(),
        };
        self.store.insert_message(&message)?;

        self.notifier.notify(&self.links.chat(game_id));
        Ok(message)
    }

    // ============================================================================
    // LOADING
    // ============================================================================

    fn load_game(&self, game_id: &str) -> Result<Versioned<Game>, ServiceError> {
        self.store
            .get_game(game_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("game {}", game_id)))
    }

    fn load_state(&self, game_id: &str) -> Result<Versioned<GameState>, ServiceError> {
        self.store
            .get_state(game_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("state of game {}", game_id)))
    }
}
