use crate::game::board::EdgeKey;
use crate::game::error::GameError;
use crate::game::game_state::GameState;
use crate::game::player::PlayerId;

/// Admission check for an edge claim. Never mutates `state`.
///
/// The caller checks that the game is in progress before asking.
pub fn validate_move(state: &GameState, player: &PlayerId, edge: &EdgeKey) -> Result<(), GameError> {
    if &state.turn != player {
        return Err(GameError::NotYourTurn);
    }

    match state.edges.get(edge) {
        None => Err(GameError::UnknownEdge(edge.to_string())),
        Some(Some(_)) => Err(GameError::AlreadyClaimed(*edge)),
        Some(None) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game::{Game, GameStatus};
    use assert_matches::assert_matches;

    fn state() -> GameState {
        let game = Game {
            id: "g".to_string(),
            name: "g".to_string(),
            width: 4,
            height: 4,
            owner: PlayerId::new("p1"),
            players: vec![PlayerId::new("p1"), PlayerId::new("p2")],
            status: GameStatus::InProgress,
        };
        GameState::initial(&game).unwrap()
    }

    #[test]
    fn test_turn_is_checked_first() {
        let mut state = state();
        let edge = EdgeKey::horizontal(0, 0);
        state.edges.insert(edge, Some(PlayerId::new("p1")));
        assert_matches!(
            validate_move(&state, &PlayerId::new("p2"), &edge),
            Err(GameError::NotYourTurn)
        );
    }

    #[test]
    fn test_unknown_edge() {
        let state = state();
        assert_matches!(
            validate_move(&state, &PlayerId::new("p1"), &EdgeKey::horizontal(0, 4)),
            Err(GameError::UnknownEdge(key)) if key == "0h4"
        );
        assert_matches!(
            validate_move(&state, &PlayerId::new("p1"), &EdgeKey::vertical(4, 0)),
            Err(GameError::UnknownEdge(_))
        );
    }

    #[test]
    fn test_claimed_edge() {
        let mut state = state();
        let edge = EdgeKey::vertical(2, 4);
        state.edges.insert(edge, Some(PlayerId::new("p2")));
        assert_matches!(
            validate_move(&state, &PlayerId::new("p1"), &edge),
            Err(GameError::AlreadyClaimed(e)) if e == edge
        );
    }

    #[test]
    fn test_admissible_move_leaves_state_alone() {
        let state = state();
        let before = state.clone();
        assert!(validate_move(&state, &PlayerId::new("p1"), &EdgeKey::vertical(3, 4)).is_ok());
        assert_eq!(state, before);
    }
}
