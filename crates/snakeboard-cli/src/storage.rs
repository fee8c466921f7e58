// Picks the state store for a session from the storage config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use snakeboard_core::config::StorageConfig;
use snakeboard_core::db::Database;
use snakeboard_core::store::{JsonFileStore, StateStore};

/// File name used when no storage path is configured.
pub const DEFAULT_DB_FILE: &str = "snakeboard.db";

/// Where the state lives when `storage.path` is unset: the platform data
/// directory, or the working directory if the platform has none.
pub fn default_store_path() -> PathBuf {
    ProjectDirs::from("", "", "snakeboard")
        .map(|dirs| dirs.data_dir().join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

/// Open the configured store. Returns `None` when persistence is disabled.
///
/// A `.json` path selects the JSON file store; anything else is a SQLite
/// database.
pub fn open_store(config: &StorageConfig) -> Result<Option<Box<dyn StateStore>>> {
    if !config.enabled {
        return Ok(None);
    }

    let path = config
        .path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(default_store_path);

    if is_json(&path) {
        let store = JsonFileStore::new(path);
        tracing::info!("Using state file {}", store.path().display());
        let store: Box<dyn StateStore> = Box::new(store);
        return Ok(Some(store));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let path_str = path
        .to_str()
        .with_context(|| format!("database path is not valid UTF-8: {}", path.display()))?;
    let db = Database::open(path_str)?;
    let draft_id = db.ensure_draft_id()?;
    tracing::info!("Using database {} (draft {})", path.display(), draft_id);
    let store: Box<dyn StateStore> = Box::new(db);
    Ok(Some(store))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
