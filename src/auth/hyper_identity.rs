//! Delegation to a remote hypermedia identity service.
//!
//! `GET API_URL` returns links to the user collection and (optionally) the current
//! account; the account document's `href` becomes the player id.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::identity::{IdentityError, IdentityProvider, PlayerProfile};
use crate::game::PlayerId;

const HYPER_JSON: &str = "application/hyper+json";

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
}

#[derive(Debug, Deserialize)]
struct RootDocument {
    users: Link,
    account: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct AccountDocument {
    href: Option<String>,
    id: Option<serde_json::Value>,
    name: Option<String>,
    #[serde(alias = "first-name")]
    first_name: Option<String>,
    #[serde(alias = "last-name")]
    last_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    api_url: Url,
}

impl HttpIdentityProvider {
    pub fn new(api_url: &str) -> Result<Self, IdentityError> {
        let api_url = Url::parse(api_url)
            .map_err(|e| IdentityError::Config(format!("API_URL {:?}: {}", api_url, e)))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, api_url })
    }

    pub fn from_env() -> Option<Result<Self, IdentityError>> {
        std::env::var("API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .map(|url| Self::new(&url))
    }

    fn resolve(&self, href: &str) -> Result<Url, IdentityError> {
        self.api_url
            .join(href)
            .map_err(|e| IdentityError::InvalidCredential(format!("bad link {:?}: {}", href, e)))
    }

    /// GETs a hypermedia document. `Ok(None)` means the service answered 404.
    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        authorization: &str,
    ) -> Result<Option<T>, IdentityError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, HYPER_JSON)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                IdentityError::InvalidCredential(format!("{} refused the credential", url)),
            ),
            StatusCode::NOT_FOUND => Ok(None),
            status => {
                log::warn!("identity service answered {} for {}", status, url);
                Err(IdentityError::UpstreamStatus(status))
            }
        }
    }
}

fn id_to_string(id: serde_json::Value) -> String {
    match id {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn authenticate(&self, authorization: &str) -> Result<PlayerProfile, IdentityError> {
        let root: RootDocument = self
            .fetch(self.api_url.clone(), authorization)
            .await?
            .ok_or(IdentityError::UpstreamStatus(StatusCode::NOT_FOUND))?;

        let users = self.resolve(&root.users.href)?;
        let account_url = match root.account {
            Some(account) => self.resolve(&account.href)?,
            None => self.resolve(&format!("{}/current", users.as_str().trim_end_matches('/')))?,
        };

        let account: AccountDocument = self
            .fetch(account_url, authorization)
            .await?
            .ok_or(IdentityError::UpstreamStatus(StatusCode::NOT_FOUND))?;
        let id = match (account.href, account.id) {
            (Some(href), _) => self.resolve(&href)?.to_string(),
            (None, Some(id)) => {
                format!("{}/{}", users.as_str().trim_end_matches('/'), id_to_string(id))
            }
            (None, None) => {
                return Err(IdentityError::InvalidCredential(
                    "account document has neither href nor id".to_string(),
                ))
            }
        };

        log::debug!("authenticated {}", id);
        Ok(PlayerProfile {
            id: PlayerId::new(id),
            name: account.name,
            first_name: account.first_name,
            last_name: account.last_name,
        })
    }

    async fn profile(
        &self,
        authorization: &str,
        player: &PlayerId,
    ) -> Result<PlayerProfile, IdentityError> {
        let url =
            Url::parse(player.as_str()).map_err(|_| IdentityError::UnknownPlayer(player.clone()))?;

        let account: AccountDocument = self
            .fetch(url, authorization)
            .await?
            .ok_or_else(|| IdentityError::UnknownPlayer(player.clone()))?;

        Ok(PlayerProfile {
            id: player.clone(),
            name: account.name,
            first_name: account.first_name,
            last_name: account.last_name,
        })
    }
}
