// SQLite persistence layer for draft state.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::draft::state::DraftState;
use crate::store::{SavedState, StateStore};

/// SQLite-backed key-value store for draft state.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Key under which the board state is stored.
    const BOARD_STATE_KEY: &'static str = "board_state";

    /// Key used to store the current draft ID.
    const DRAFT_ID_KEY: &'static str = "current_draft_id";

    /// Open (or create) a SQLite database at `path` and ensure the schema
    /// exists. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS draft_state (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Persist an arbitrary JSON value under `key`. Uses INSERT OR REPLACE so
    /// repeated saves overwrite the previous value.
    pub fn save_state(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let conn = self.conn();
        let json_str =
            serde_json::to_string(value).context("failed to serialize state value")?;
        conn.execute(
            "INSERT OR REPLACE INTO draft_state (key, value) VALUES (?1, ?2)",
            params![key, json_str],
        )
        .context("failed to save state")?;
        Ok(())
    }

    /// Load a previously saved JSON value by `key`. Returns `None` if the key
    /// does not exist.
    pub fn load_state(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT value FROM draft_state WHERE key = ?1")
            .context("failed to prepare load_state query")?;

        let mut rows = stmt
            .query_map(params![key], |row| {
                let json_str: String = row.get(0)?;
                Ok(json_str)
            })
            .context("failed to query draft state")?;

        match rows.next() {
            Some(row_result) => {
                let json_str = row_result.context("failed to read state row")?;
                let value: serde_json::Value = serde_json::from_str(&json_str)
                    .context("failed to deserialize state value")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Delete the stored board state, keeping the draft ID.
    pub fn clear_draft(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "DELETE FROM draft_state WHERE key = ?1",
            params![Self::BOARD_STATE_KEY],
        )
        .context("failed to delete draft state")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Draft ID management
    // ------------------------------------------------------------------

    /// Retrieve the stored draft ID. Returns `None` if none has been set yet.
    pub fn get_draft_id(&self) -> Result<Option<String>> {
        let value = self.load_state(Self::DRAFT_ID_KEY)?;
        Ok(value.and_then(|v| v.as_str().map(|s| s.to_string())))
    }

    pub fn set_draft_id(&self, draft_id: &str) -> Result<()> {
        self.save_state(
            Self::DRAFT_ID_KEY,
            &serde_json::Value::String(draft_id.to_string()),
        )
    }

    /// Generate a new unique draft ID based on the current UTC timestamp.
    ///
    /// Format: `draft_YYYYMMDD_HHMMSS_SSS` (e.g. `draft_20260228_143022_123`).
    pub fn generate_draft_id() -> String {
        let now = chrono::Utc::now();
        now.format("draft_%Y%m%d_%H%M%S_%3f").to_string()
    }

    /// Return the stored draft ID, generating and storing one on first use.
    pub fn ensure_draft_id(&self) -> Result<String> {
        if let Some(id) = self.get_draft_id()? {
            return Ok(id);
        }
        let id = Self::generate_draft_id();
        self.set_draft_id(&id)?;
        Ok(id)
    }
}

impl StateStore for Database {
    fn save(&self, state: &DraftState) -> Result<()> {
        let value = serde_json::to_value(SavedState::now(state))
            .context("failed to serialize draft state")?;
        self.save_state(Self::BOARD_STATE_KEY, &value)
    }

    fn load(&self) -> Result<Option<DraftState>> {
        let Some(value) = self.load_state(Self::BOARD_STATE_KEY)? else {
            return Ok(None);
        };
        let saved: SavedState =
            serde_json::from_value(value).context("stored board state is malformed")?;
        Ok(Some(saved.state))
    }

    fn clear(&self) -> Result<()> {
        self.clear_draft()
    }
}
