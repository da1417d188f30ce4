//! Persistence contract for games, their states and chat.
//!
//! Writers pass the version they read back in; a record changed in between is reported
//! as [`StoreError::Conflict`] instead of being overwritten.

use chrono::{DateTime, Utc};

use crate::game::{Game, GameState, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub record: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub game_id: String,
    pub author: PlayerId,
    pub content: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{kind} {id} was modified concurrently")]
    Conflict { kind: &'static str, id: String },

    #[error("store connection lock poisoned")]
    Poisoned,
}

pub trait GameStore: Send + Sync {
    /// All games, oldest first.
    fn list_games(&self) -> Result<Vec<Game>, StoreError>;

    fn get_game(&self, id: &str) -> Result<Option<Versioned<Game>>, StoreError>;

    fn insert_game(&self, game: &Game) -> Result<(), StoreError>;

    /// Returns the new version.
    fn update_game(&self, game: &Game, expected_version: u64) -> Result<u64, StoreError>;

    /// Writes the started `game` and its first `state` in one transaction.
    fn start_game(
        &self,
        game: &Game,
        expected_version: u64,
        state: &GameState,
    ) -> Result<(), StoreError>;

    fn get_state(&self, game_id: &str) -> Result<Option<Versioned<GameState>>, StoreError>;

    /// Returns the new version.
    fn update_state(&self, state: &GameState, expected_version: u64) -> Result<u64, StoreError>;

    /// Messages of one game, oldest first.
    fn list_messages(&self, game_id: &str) -> Result<Vec<ChatMessage>, StoreError>;

    fn insert_message(&self, message: &ChatMessage) -> Result<(), StoreError>;
}
