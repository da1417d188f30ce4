pub mod game_service;
pub mod links;
pub mod notifier;
pub mod sqlite_store;
pub mod store;

pub use game_service::{GameAction, GameService};
pub use links::Links;
pub use notifier::{HttpNotifier, Notifier, NullNotifier};
pub use sqlite_store::SqliteStore;
pub use store::{ChatMessage, GameStore, StoreError, Versioned};

use crate::game::GameError;

/// Failures of a single service call. Nothing has been written when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid action {0:?}")]
    InvalidAction(String),

    #[error("missing {0} parameter")]
    MissingParameter(&'static str),

    #[error("only players of this game may do that")]
    NotAPlayer,

    #[error(transparent)]
    Store(#[from] StoreError),
}
