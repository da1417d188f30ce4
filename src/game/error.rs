use crate::game::board::EdgeKey;

/// Rejections raised by the game rules. None of them leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("request missing \"name\" parameter")]
    InvalidName,

    #[error("invalid board dimensions {width}x{height}: both sides must be between {min} and {max}")]
    InvalidDimensions {
        width: i64,
        height: i64,
        min: u32,
        max: u32,
    },

    #[error("game has already started")]
    GameAlreadyStarted,

    #[error("only the owner can start the game")]
    NotOwner,

    #[error("at least {required} players are needed to start, found {found}")]
    InsufficientPlayers { required: usize, found: usize },

    #[error("game has not started yet")]
    GameNotStarted,

    #[error("tried to play out of turn")]
    NotYourTurn,

    #[error("unknown edge {0:?}")]
    UnknownEdge(String),

    #[error("edge {0} is already claimed")]
    AlreadyClaimed(EdgeKey),
}
