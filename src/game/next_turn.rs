use crate::game::player::PlayerId;

/// Who moves next.
///
/// Closing a cell earns another move. Otherwise the turn passes to the next player in
/// join order, wrapping after the last one. A mover missing from `players` hands the
/// turn to the first player.
pub fn next_turn(players: &[PlayerId], current: &PlayerId, scored: bool) -> PlayerId {
    if scored || players.is_empty() {
        return current.clone();
    }

    let next = players
        .iter()
        .position(|player| player == current)
        .map_or(0, |idx| (idx + 1) % players.len());

    players[next].clone()
}
