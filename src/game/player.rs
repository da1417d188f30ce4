//! Opaque player identifiers.
//!
//! The identity provider hands out a stable URI-like string per player. It is
//! used as-is for equality, ordering and map keys.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encoding used when the id is embedded in a URL path segment.
    pub fn to_path_segment(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.as_bytes())
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
        String::from_utf8(bytes).ok().map(Self)
    }

    /// Stable `#rrggbb` display colour derived from the id.
    pub fn color(&self) -> String {
        let hash = self
            .0
            .encode_utf16()
            .fold(0i32, |hash, unit| {
                i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
            });

        (0..3).fold(String::from("#"), |mut color, i| {
            color.push_str(&format!("{:02x}", (hash >> (i * 8)) & 0xFF));
            color
        })
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
