use crate::game::PlayerId;

/// Canonical resource URLs, relative to the API base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    base: String,
}

impl Links {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> String {
        if self.base.is_empty() {
            "/".to_string()
        } else {
            self.base.clone()
        }
    }

    pub fn games(&self) -> String {
        format!("{}/games", self.base)
    }

    pub fn game(&self, game_id: &str) -> String {
        format!("{}/games/{}", self.base, game_id)
    }

    pub fn state(&self, game_id: &str) -> String {
        format!("{}/games/{}/state", self.base, game_id)
    }

    pub fn chat(&self, game_id: &str) -> String {
        format!("{}/games/{}/chat", self.base, game_id)
    }

    pub fn user(&self, player: &PlayerId) -> String {
        format!("{}/users/{}", self.base, player.to_path_segment())
    }
}
