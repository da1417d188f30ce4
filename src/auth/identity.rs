//! Identity provider contract
//!
//! The game server never manages accounts. It hands the caller's `Authorization` header
//! to a provider and gets back a stable player id.

use async_trait::async_trait;
use serde::Serialize;

use crate::game::PlayerId;

/// Who a credential belongs to, as far as the provider is willing to tell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PlayerProfile {
    pub fn anonymous(id: PlayerId) -> Self {
        Self {
            id,
            name: None,
            first_name: None,
            last_name: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("missing authorization header")]
    MissingCredential,

    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("identity service error: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("identity service answered {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("identity provider misconfigured: {0}")]
    Config(String),
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves an `Authorization` header value to the calling player.
    async fn authenticate(&self, authorization: &str) -> Result<PlayerProfile, IdentityError>;

    /// Looks up another player on behalf of the caller.
    async fn profile(
        &self,
        authorization: &str,
        player: &PlayerId,
    ) -> Result<PlayerProfile, IdentityError>;
}
