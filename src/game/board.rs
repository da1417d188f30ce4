//! Board model: typed edge and cell keys for a `width × height` grid.
//!
//! Keys only become strings at the serialization boundary, where edges use
//! `"{row}h{col}"` / `"{row}v{col}"` and cells use `"{row}|{col}"`.

use crate::game::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Claim state of every edge on the board.
pub type Edges = BTreeMap<EdgeKey, Option<PlayerId>>;

/// Claim state of every cell on the board.
pub type Cells = BTreeMap<CellKey, Option<PlayerId>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

impl Orientation {
    pub fn as_char(&self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }
}

/// Position of a unit edge between two grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EdgeKey {
    pub orientation: Orientation,
    pub row: u32,
    pub col: u32,
}

impl EdgeKey {
    pub fn horizontal(row: u32, col: u32) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            row,
            col,
        }
    }

    pub fn vertical(row: u32, col: u32) -> Self {
        Self {
            orientation: Orientation::Vertical,
            row,
            col,
        }
    }
}

/// Position of a unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CellKey {
    pub row: u32,
    pub col: u32,
}

impl CellKey {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Top, bottom, left and right edges, in that order.
    pub fn bounding_edges(&self) -> [EdgeKey; 4] {
        [
            EdgeKey::horizontal(self.row, self.col),
            EdgeKey::horizontal(self.row + 1, self.col),
            EdgeKey::vertical(self.row, self.col),
            EdgeKey::vertical(self.row, self.col + 1),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed {kind} key: {key:?}")]
pub struct KeyParseError {
    pub kind: &'static str,
    pub key: String,
}

impl KeyParseError {
    fn edge(key: &str) -> Self {
        Self {
            kind: "edge",
            key: key.to_string(),
        }
    }

    fn cell(key: &str) -> Self {
        Self {
            kind: "cell",
            key: key.to_string(),
        }
    }
}

// ============================================================================
// ENUMERATION
// ============================================================================

/// Every edge of the grid, unclaimed, including the enclosing boundary.
pub fn init_edges(width: u32, height: u32) -> Edges {
    let horizontal = (0..=height)
        .flat_map(|row| (0..width).map(move |col| EdgeKey::horizontal(row, col)));
    let vertical = (0..height)
        .flat_map(|row| (0..=width).map(move |col| EdgeKey::vertical(row, col)));

    horizontal.chain(vertical).map(|key| (key, None)).collect()
}

/// Every cell of the grid, unclaimed.
pub fn init_cells(width: u32, height: u32) -> Cells {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| (CellKey::new(row, col), None)))
        .collect()
}

// ============================================================================
// PARSING
// ============================================================================

pub fn parse_edge_key(key: &str) -> Result<EdgeKey, KeyParseError> {
    let (orientation, split) = match key.find(['h', 'v']) {
        Some(idx) if key[idx..].starts_with('h') => (Orientation::Horizontal, idx),
        Some(idx) => (Orientation::Vertical, idx),
        None => return Err(KeyParseError::edge(key)),
    };

    let row = parse_coordinate(&key[..split]).ok_or_else(|| KeyParseError::edge(key))?;
    let col = parse_coordinate(&key[split + 1..]).ok_or_else(|| KeyParseError::edge(key))?;

    Ok(EdgeKey {
        orientation,
        row,
        col,
    })
}

pub fn parse_cell_key(key: &str) -> Result<CellKey, KeyParseError> {
    let (row, col) = key.split_once('|').ok_or_else(|| KeyParseError::cell(key))?;
    let row = parse_coordinate(row).ok_or_else(|| KeyParseError::cell(key))?;
    let col = parse_coordinate(col).ok_or_else(|| KeyParseError::cell(key))?;
    Ok(CellKey::new(row, col))
}

// u32::from_str accepts a leading '+', which no key ever carries.
fn parse_coordinate(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.row, self.orientation.as_char(), self.col)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.row, self.col)
    }
}

impl FromStr for EdgeKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_edge_key(s)
    }
}

impl FromStr for CellKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cell_key(s)
    }
}

impl From<EdgeKey> for String {
    fn from(key: EdgeKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for EdgeKey {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_edge_key(&value)
    }
}

impl From<CellKey> for String {
    fn from(key: CellKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for CellKey {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_cell_key(&value)
    }
}
