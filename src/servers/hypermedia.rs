//! JSON views of the API resources.
//!
//! Every view carries its own `href`. Follow-up requests a viewer is allowed to make are
//! described as forms (`method`, `action`, `input`); forms a viewer may not submit are
//! left out entirely.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::auth::PlayerProfile;
use crate::game::{
    Game, GameState, GameStatus, Orientation, PlayerId, DEFAULT_DIMENSION, MAX_DIMENSION,
    MIN_DIMENSION,
};
use crate::services::{ChatMessage, Links};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    pub fn new(href: String) -> Self {
        Self { href }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Input {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl Input {
    fn of(kind: &'static str) -> Self {
        Self {
            kind,
            value: None,
            min: None,
            max: None,
            required: None,
        }
    }

    pub fn text() -> Self {
        Self::of("text")
    }

    pub fn number(value: u32, min: u32, max: u32) -> Self {
        Self {
            value: Some(value.into()),
            min: Some(min),
            max: Some(max),
            ..Self::of("number")
        }
    }

    pub fn hidden(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::of("hidden")
        }
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    pub method: &'static str,
    pub action: String,
    pub input: BTreeMap<&'static str, Input>,
}

impl Form {
    pub fn post(action: String) -> Self {
        Self {
            method: "POST",
            action,
            input: BTreeMap::new(),
        }
    }

    pub fn with_input(mut self, name: &'static str, input: Input) -> Self {
        self.input.insert(name, input);
        self
    }
}

// ============================================================================
// VIEWS
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RootView {
    pub href: String,
    pub account: Link,
    pub games: Link,
}

#[derive(Debug, Serialize)]
pub struct GamesView {
    pub href: String,
    pub data: Vec<Link>,
    pub open: Vec<Link>,
    pub create: Form,
}

#[derive(Debug, Serialize)]
pub struct GameView {
    pub href: String,
    pub name: String,
    pub owner: Link,
    pub players: Vec<Link>,
    pub width: u32,
    pub height: u32,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join: Option<Form>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Form>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat: Option<Link>,
}

#[derive(Debug, Serialize)]
pub struct EdgeView {
    pub row: u32,
    pub col: u32,
    #[serde(rename = "type")]
    pub orientation: Orientation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupy: Option<Form>,
}

#[derive(Debug, Serialize)]
pub struct CellView {
    pub row: u32,
    pub col: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Link>,
}

#[derive(Debug, Serialize)]
pub struct ScoreView {
    pub player: Link,
    pub score: u32,
}

#[derive(Debug, Serialize)]
pub struct StateView {
    pub href: String,
    pub edges: Vec<EdgeView>,
    pub cells: Vec<CellView>,
    pub scores: Vec<ScoreView>,
    pub turn: Link,
    pub complete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leaders: Vec<Link>,
}

#[derive(Debug, Serialize)]
pub struct MessageView {
    pub author: Link,
    pub date: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatView {
    pub href: String,
    pub data: Vec<MessageView>,
    pub message: Form,
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "first-name", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "last-name", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub color: String,
}

// ============================================================================
// RENDERING
// ============================================================================

fn user_link(links: &Links, player: &PlayerId) -> Link {
    Link::new(links.user(player))
}

pub fn render_root(links: &Links, viewer: &PlayerId) -> RootView {
    RootView {
        href: links.root(),
        account: user_link(links, viewer),
        games: Link::new(links.games()),
    }
}

pub fn render_games(links: &Links, games: &[Game]) -> GamesView {
    let link = |game: &Game| Link::new(links.game(&game.id));

    GamesView {
        href: links.games(),
        data: games.iter().map(link).collect(),
        open: games.iter().filter(|g| g.is_waiting()).map(link).collect(),
        create: Form::post(links.games())
            .with_input("name", Input::text())
            .with_input("width", Input::number(DEFAULT_DIMENSION, MIN_DIMENSION, MAX_DIMENSION))
            .with_input("height", Input::number(DEFAULT_DIMENSION, MIN_DIMENSION, MAX_DIMENSION)),
    }
}

pub fn render_game(links: &Links, game: &Game, viewer: &PlayerId) -> GameView {
    let action_form =
        |action: &str| Form::post(links.game(&game.id)).with_input("_action", Input::hidden(action));

    GameView {
        href: links.game(&game.id),
        name: game.name.clone(),
        owner: user_link(links, &game.owner),
        players: game.players.iter().map(|p| user_link(links, p)).collect(),
        width: game.width,
        height: game.height,
        status: game.status,
        join: game.can_join(viewer).then(|| action_form("join")),
        start: game.can_start(viewer).then(|| action_form("start")),
        state: (!game.is_waiting()).then(|| Link::new(links.state(&game.id))),
        chat: game.is_player(viewer).then(|| Link::new(links.chat(&game.id))),
    }
}

/// Board view for `viewer`. `occupy` forms appear on free edges only while the viewer
/// holds the turn.
pub fn render_state(links: &Links, game: &Game, state: &GameState, viewer: &PlayerId) -> StateView {
    let can_play = &state.turn == viewer;
    let action = links.state(&game.id);

    let edges = state
        .edges
        .iter()
        .map(|(edge, owner)| EdgeView {
            row: edge.row,
            col: edge.col,
            orientation: edge.orientation,
            owner: owner.as_ref().map(|p| user_link(links, p)),
            occupy: (owner.is_none() && can_play).then(|| {
                Form::post(action.clone()).with_input("position", Input::hidden(edge.to_string()))
            }),
        })
        .collect();

    let cells = state
        .cells
        .iter()
        .map(|(cell, owner)| CellView {
            row: cell.row,
            col: cell.col,
            owner: owner.as_ref().map(|p| user_link(links, p)),
        })
        .collect();

    let scores = game
        .players
        .iter()
        .filter_map(|player| {
            state.scores.get(player).map(|score| ScoreView {
                player: user_link(links, player),
                score: *score,
            })
        })
        .collect();

    let complete = state.is_complete();
    let leaders = if complete {
        state.leaders().iter().map(|p| user_link(links, p)).collect()
    } else {
        Vec::new()
    };

    StateView {
        href: action,
        edges,
        cells,
        scores,
        turn: user_link(links, &state.turn),
        complete,
        leaders,
    }
}

pub fn render_chat(links: &Links, game_id: &str, messages: &[ChatMessage]) -> ChatView {
    ChatView {
        href: links.chat(game_id),
        data: messages
            .iter()
            .map(|m| MessageView {
                author: user_link(links, &m.author),
                date: m.date.to_rfc3339(),
                content: m.content.clone(),
            })
            .collect(),
        message: Form::post(links.chat(game_id)).with_input("content", Input::text().required()),
    }
}

pub fn render_user(links: &Links, profile: &PlayerProfile) -> UserView {
    UserView {
        href: links.user(&profile.id),
        name: profile.name.clone(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        color: profile.id.color(),
    }
}
