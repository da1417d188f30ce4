//! Authentication module
//!
//! Resolves the `Authorization` header of every API request to a player:
//! - remote hypermedia identity service (`API_URL`)
//! - locally signed JWT bearer tokens otherwise

pub mod hyper_identity;
pub mod identity;
pub mod jwt;

pub use hyper_identity::HttpIdentityProvider;
pub use identity::{IdentityError, IdentityProvider, PlayerProfile};
pub use jwt::{Claims, JwtConfig, JwtIdentityProvider, JwtManager};
