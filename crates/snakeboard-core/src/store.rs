// Persistence seam for draft state, plus a plain JSON file implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::draft::state::DraftState;

/// Somewhere a [`DraftState`] can be saved and loaded across sessions.
///
/// Only the mutable state is stored; the draft order is re-derived from
/// configuration on load.
pub trait StateStore {
    fn save(&self, state: &DraftState) -> Result<()>;

    /// Load the stored state, or `None` if nothing has been saved.
    fn load(&self) -> Result<Option<DraftState>>;

    /// Forget any stored state.
    fn clear(&self) -> Result<()>;
}

/// A stored state together with when it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedState {
    pub saved_at: chrono::DateTime<chrono::Utc>,
    pub state: DraftState,
}

impl SavedState {
    pub fn now(state: &DraftState) -> Self {
        SavedState {
            saved_at: chrono::Utc::now(),
            state: state.clone(),
        }
    }
}

/// Stores the state as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn save(&self, state: &DraftState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&SavedState::now(state))
            .context("failed to serialize draft state")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn load(&self) -> Result<Option<DraftState>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        };
        let saved: SavedState = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(saved.state))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}
