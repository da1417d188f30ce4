use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
    },
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

use super::api::AppState;
use super::error::ApiError;
use crate::auth::{IdentityError, PlayerProfile};

/// The authenticated caller. Every API route requires one.
#[derive(Debug, Clone)]
pub struct CurrentPlayer {
    pub profile: PlayerProfile,
    /// Raw `Authorization` header, reused for lookups on the caller's behalf.
    pub authorization: String,
}

impl FromRequestParts<Arc<AppState>> for CurrentPlayer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or(IdentityError::MissingCredential)?;

        let profile = state.identity.authenticate(&authorization).await?;
        Ok(Self {
            profile,
            authorization,
        })
    }
}

/// Request body accepted either as JSON or as an urlencoded form.
#[derive(Debug)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
            Ok(Self(value))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Accepts `9`, `9.0` or `"9"`. Strings are read up to their first non-digit, so `"9.5"`
/// is 9 and `"5abc"` is 5; a string without leading digits counts as absent.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        NumberOrText::Integer(n) => Some(n),
        NumberOrText::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        NumberOrText::Float(_) => None,
        NumberOrText::Text(s) => leading_integer(&s),
    }))
}

fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let unsigned = raw.trim_start_matches(['+', '-']);
    let sign_len = raw.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    raw[..sign_len + digits].parse().ok()
}
