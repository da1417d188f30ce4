//! JWT token handling
//!
//! Local identity mode: bearer tokens signed with a shared secret, whose `sub` claim is
//! the player id.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use super::identity::{IdentityError, IdentityProvider, PlayerProfile};
use crate::game::PlayerId;

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // player id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at timestamp
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
    expiration_hours: u64,
}

// Manual impl so the secret never appears in debug output.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: String, expiration_hours: u64) -> Self {
        Self {
            secret,
            expiration_hours,
        }
    }

    /// Reads `JWT_SECRET` (required) and `JWT_EXPIRATION_HOURS` (default 24).
    pub fn from_env() -> Result<Self, IdentityError> {
        Self::from_values(
            std::env::var("JWT_SECRET").ok(),
            std::env::var("JWT_EXPIRATION_HOURS").ok(),
        )
    }

    fn from_values(
        secret: Option<String>,
        expiration_hours: Option<String>,
    ) -> Result<Self, IdentityError> {
        let secret = secret
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| IdentityError::Config("JWT_SECRET must be set".to_string()))?;
        let expiration_hours = expiration_hours
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);
        Ok(Self::new(secret, expiration_hours))
    }
}

/// JWT manager
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Create a new JWT token for a player
    pub fn create_token(
        &self,
        player: &PlayerId,
        name: Option<&str>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp().max(0) as usize;
        let expiration = now + (self.config.expiration_hours as usize * 3600);

        let claims = Claims {
            sub: player.as_str().to_string(),
            name: name.map(str::to_string),
            exp: expiration,
            iat: now,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
    }

    /// Verify and decode a JWT token
    pub fn verify_token(&self, token: &str) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &Validation::default(),
        )
    }
}

/// [`IdentityProvider`] backed by locally verified bearer tokens.
#[derive(Clone)]
pub struct JwtIdentityProvider {
    jwt: JwtManager,
}

impl JwtIdentityProvider {
    pub fn new(jwt: JwtManager) -> Self {
        Self { jwt }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn authenticate(&self, authorization: &str) -> Result<PlayerProfile, IdentityError> {
        let token = authorization
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| IdentityError::InvalidCredential("expected a Bearer token".to_string()))?;

        let claims = self
            .jwt
            .verify_token(token)
            .map_err(|e| IdentityError::InvalidCredential(e.to_string()))?
            .claims;

        Ok(PlayerProfile {
            id: PlayerId::new(claims.sub),
            name: claims.name,
            first_name: None,
            last_name: None,
        })
    }

    // Tokens only describe their bearer; other players are known by id alone.
    async fn profile(
        &self,
        authorization: &str,
        player: &PlayerId,
    ) -> Result<PlayerProfile, IdentityError> {
        let current = self.authenticate(authorization).await?;
        if &current.id == player {
            Ok(current)
        } else {
            Ok(PlayerProfile::anonymous(player.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn manager() -> JwtManager {
        JwtManager::new(JwtConfig::new("test-secret".to_string(), 24))
    }

    #[test]
    fn test_create_and_verify_token() {
        let manager = manager();
        let token = manager
            .create_token(&PlayerId::new("https://id.example.com/users/7"), Some("Seven"))
            .unwrap();

        let verified = manager.verify_token(&token).unwrap();
        assert_eq!(verified.claims.sub, "https://id.example.com/users/7");
        assert_eq!(verified.claims.name.as_deref(), Some("Seven"));
    }

    #[test]
    fn test_config_requires_secret() {
        assert_matches!(JwtConfig::from_values(None, None), Err(IdentityError::Config(_)));
        assert_matches!(
            JwtConfig::from_values(Some("  ".to_string()), None),
            Err(IdentityError::Config(_))
        );

        let config = JwtConfig::from_values(Some("s3cret".to_string()), Some("2".to_string()))
            .unwrap();
        assert_eq!(config.expiration_hours, 2);
        let config = JwtConfig::from_values(Some("s3cret".to_string()), Some("soon".to_string()))
            .unwrap();
        assert_eq!(config.expiration_hours, 24);
    }

    #[test]
    fn test_invalid_token() {
        assert!(manager().verify_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = JwtManager::new(JwtConfig::new("other-secret".to_string(), 24));
        let token = other.create_token(&PlayerId::new("p1"), None).unwrap();
        assert!(manager().verify_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_provider_resolves_bearer_token() {
        let manager = manager();
        let provider = JwtIdentityProvider::new(manager.clone());
        let token = manager.create_token(&PlayerId::new("p1"), Some("Ada")).unwrap();

        let profile = provider.authenticate(&format!("Bearer {}", token)).await.unwrap();
        assert_eq!(profile.id, PlayerId::new("p1"));
        assert_eq!(profile.name.as_deref(), Some("Ada"));

        let other = provider
            .profile(&format!("Bearer {}", token), &PlayerId::new("p2"))
            .await
            .unwrap();
        assert_eq!(other, PlayerProfile::anonymous(PlayerId::new("p2")));
    }

    #[tokio::test]
    async fn test_provider_rejects_non_bearer_header() {
        let provider = JwtIdentityProvider::new(manager());
        assert_matches!(
            provider.authenticate("Basic dXNlcjpwYXNz").await,
            Err(IdentityError::InvalidCredential(_))
        );
        assert_matches!(
            provider.authenticate("Bearer ").await,
            Err(IdentityError::InvalidCredential(_))
        );
    }
}
