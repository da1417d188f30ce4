use crate::game::board::{CellKey, EdgeKey, Edges};
use crate::game::game_state::GameState;
use crate::game::player::PlayerId;

/// Result of applying one edge claim to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub state: GameState,
    /// Cells closed by this claim, in board order. At most two.
    pub claimed: Vec<CellKey>,
}

impl Resolution {
    pub fn scored(&self) -> bool {
        !self.claimed.is_empty()
    }
}

/// Claims `edge` for `player` and hands every newly enclosed cell to them.
///
/// The whole board is swept rather than only the neighbours of `edge`; cells that were
/// already owned keep their owner and never score twice. The claim must have passed
/// [`validate_move`](crate::game::validate_move::validate_move).
pub fn resolve_claim(mut state: GameState, player: &PlayerId, edge: EdgeKey) -> Resolution {
    state.edges.insert(edge, Some(player.clone()));

    let closed: Vec<CellKey> = state
        .cells
        .iter()
        .filter(|(cell, owner)| owner.is_none() && is_enclosed(&state.edges, cell))
        .map(|(cell, _)| *cell)
        .collect();

    for cell in &closed {
        state.cells.insert(*cell, Some(player.clone()));
        *state.scores.entry(player.clone()).or_insert(0) += 1;
    }

    Resolution {
        state,
        claimed: closed,
    }
}

fn is_enclosed(edges: &Edges, cell: &CellKey) -> bool {
    cell.bounding_edges()
        .iter()
        .all(|edge| matches!(edges.get(edge), Some(Some(_))))
}
