use crate::game::player::PlayerId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DIMENSION: u32 = 9;
pub const MIN_DIMENSION: u32 = 4;
/// Largest side accepted; the board is built eagerly at start.
pub const MAX_DIMENSION: u32 = 64;
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Waiting,
    InProgress,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Waiting => "waiting",
            GameStatus::InProgress => "in-progress",
        }
    }
}

/// A game and its roster. `players` is in join order; the creator comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub owner: PlayerId,
    pub players: Vec<PlayerId>,
    pub status: GameStatus,
}

impl Game {
    pub fn is_player(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }

    pub fn is_owner(&self, player: &PlayerId) -> bool {
        &self.owner == player
    }

    pub fn is_waiting(&self) -> bool {
        self.status == GameStatus::Waiting
    }

    pub fn can_join(&self, player: &PlayerId) -> bool {
        self.is_waiting() && !self.is_player(player)
    }

    pub fn can_start(&self, player: &PlayerId) -> bool {
        self.is_waiting() && self.is_owner(player) && self.players.len() >= MIN_PLAYERS
    }
}
