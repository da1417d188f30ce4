pub mod board;
pub mod error;
pub mod game;
pub mod game_state;
pub mod lifecycle;
pub mod next_turn;
pub mod player;
pub mod resolve_cells;
pub mod validate_move;

pub use board::{
    init_cells, init_edges, parse_cell_key, parse_edge_key, CellKey, Cells, EdgeKey, Edges,
    KeyParseError, Orientation,
};
pub use error::GameError;
pub use game::{Game, GameStatus, DEFAULT_DIMENSION, MAX_DIMENSION, MIN_DIMENSION, MIN_PLAYERS};
pub use game_state::{GameState, Scores};
pub use lifecycle::{apply_move, create_game, join_game, start_game, JoinOutcome, MoveOutcome};
pub use next_turn::next_turn;
pub use player::PlayerId;
pub use resolve_cells::{resolve_claim, Resolution};
pub use validate_move::validate_move;
