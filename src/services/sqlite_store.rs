//! SQLite-backed [`GameStore`]
//!
//! Records are stored as JSON bodies next to a `version` column that every conditional
//! write compares and bumps.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::store::{ChatMessage, GameStore, StoreError, Versioned};
use crate::game::{Game, GameState, PlayerId};

/// Database connection wrapper
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file and initialize tables
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Create in-memory database (for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_tables()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn init_tables(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                version INTEGER NOT NULL DEFAULT 0,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS game_states (
                game_id TEXT PRIMARY KEY,
                version INTEGER NOT NULL DEFAULT 0,
                body TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY (game_id) REFERENCES games(id) ON DELETE CASCADE
            );

            CREATE TABLE IF NOT EXISTS chat_messages (
                id TEXT PRIMARY KEY,
                game_id TEXT NOT NULL,
                author TEXT NOT NULL,
                content TEXT NOT NULL,
                date TEXT NOT NULL,
                FOREIGN KEY (game_id) REFERENCES games(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_games_status ON games(status);
            CREATE INDEX IF NOT EXISTS idx_chat_game_date ON chat_messages(game_id, date);
            "#,
        )?;

        Ok(())
    }
}

fn conflict(kind: &'static str, id: &str) -> StoreError {
    StoreError::Conflict {
        kind,
        id: id.to_string(),
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

fn parse_date(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

impl GameStore for SqliteStore {
    // ==================== Game Operations ====================

    fn list_games(&self) -> Result<Vec<Game>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT body FROM games ORDER BY rowid")?;
        let bodies = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(StoreError::from))
            .collect()
    }

    fn get_game(&self, id: &str) -> Result<Option<Versioned<Game>>, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT version, body FROM games WHERE id = ?1",
                params![id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((version, body)) => Ok(Some(Versioned {
                version: version as u64,
                record: serde_json::from_str(&body)?,
            })),
            None => Ok(None),
        }
    }

    fn insert_game(&self, game: &Game) -> Result<(), StoreError> {
        let body = serde_json::to_string(game)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO games (id, status, version, body, created_at) VALUES (?1, ?2, 0, ?3, ?4)",
            params![game.id, game.status.as_str(), body, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn update_game(&self, game: &Game, expected_version: u64) -> Result<u64, StoreError> {
        let body = serde_json::to_string(game)?;
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE games SET status = ?1, body = ?2, version = version + 1
             WHERE id = ?3 AND version = ?4",
            params![game.status.as_str(), body, game.id, expected_version as i64],
        )?;

        if changed == 0 {
            return Err(conflict("game", &game.id));
        }
        Ok(expected_version + 1)
    }

    fn start_game(
        &self,
        game: &Game,
        expected_version: u64,
        state: &GameState,
    ) -> Result<(), StoreError> {
        let game_body = serde_json::to_string(game)?;
        let state_body = serde_json::to_string(state)?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            "UPDATE games SET status = ?1, body = ?2, version = version + 1
             WHERE id = ?3 AND version = ?4",
            params![game.status.as_str(), game_body, game.id, expected_version as i64],
        )?;
        if changed == 0 {
            return Err(conflict("game", &game.id));
        }

        // The primary key on game_id refuses a second state for the same game.
        tx.execute(
            "INSERT INTO game_states (game_id, version, body, updated_at) VALUES (?1, 0, ?2, ?3)",
            params![state.game_id, state_body, Utc::now().to_rfc3339()],
        )
        .map_err(|e| {
            if is_constraint_violation(&e) {
                conflict("game state", &state.game_id)
            } else {
                StoreError::from(e)
            }
        })?;

        tx.commit()?;
        Ok(())
    }

    // ==================== State Operations ====================

    fn get_state(&self, game_id: &str) -> Result<Option<Versioned<GameState>>, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT version, body FROM game_states WHERE game_id = ?1",
                params![game_id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((version, body)) => Ok(Some(Versioned {
                version: version as u64,
                record: serde_json::from_str(&body)?,
            })),
            None => Ok(None),
        }
    }

    fn update_state(&self, state: &GameState, expected_version: u64) -> Result<u64, StoreError> {
        let body = serde_json::to_string(state)?;
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE game_states SET body = ?1, version = version + 1, updated_at = ?2
             WHERE game_id = ?3 AND version = ?4",
            params![body, Utc::now().to_rfc3339(), state.game_id, expected_version as i64],
        )?;

        if changed == 0 {
            return Err(conflict("game state", &state.game_id));
        }
        Ok(expected_version + 1)
    }

    // ==================== Chat Operations ====================

    fn list_messages(&self, game_id: &str) -> Result<Vec<ChatMessage>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, game_id, author, content, date
             FROM chat_messages WHERE game_id = ?1 ORDER BY date, rowid",
        )?;

        let messages = stmt
            .query_map(params![game_id], |row| {
                Ok(ChatMessage {
                    id: row.get(0)?,
                    game_id: row.get(1)?,
                    author: PlayerId::new(row.get::<_, String>(2)?),
                    content: row.get(3)?,
                    date: parse_date(4, row.get(4)?)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(messages)
    }

    fn insert_message(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO chat_messages (id, game_id, author, content, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                message.id,
                message.game_id,
                message.author.as_str(),
                message.content,
                message.date.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        Ok(())
    }
}

impl Clone for SqliteStore {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}
