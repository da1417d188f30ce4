use crate::game::board::{init_cells, init_edges, Cells, Edges};
use crate::game::game::Game;
use crate::game::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type Scores = BTreeMap<PlayerId, u32>;

/// Mutable per-move record of a started game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: String,
    pub edges: Edges,
    pub cells: Cells,
    pub scores: Scores,
    pub turn: PlayerId,
}

impl GameState {
    /// Fresh board for `game`. Only players on the roster right now are scored.
    ///
    /// Returns `None` for an empty roster, which has nobody to hand the first turn to.
    pub fn initial(game: &Game) -> Option<Self> {
        let first = game.players.first()?.clone();
        Some(Self {
            game_id: game.id.clone(),
            edges: init_edges(game.width, game.height),
            cells: init_cells(game.width, game.height),
            scores: game.players.iter().map(|p| (p.clone(), 0)).collect(),
            turn: first,
        })
    }

    pub fn claimed_cells(&self) -> usize {
        self.cells.values().filter(|owner| owner.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.values().all(Option::is_some)
    }

    pub fn score_of(&self, player: &PlayerId) -> u32 {
        self.scores.get(player).copied().unwrap_or(0)
    }

    /// Players sharing the highest score.
    pub fn leaders(&self) -> Vec<PlayerId> {
        let Some(best) = self.scores.values().max().copied() else {
            return Vec::new();
        };
        self.scores
            .iter()
            .filter(|(_, score)| **score == best)
            .map(|(player, _)| player.clone())
            .collect()
    }
}
