// Configuration loading and parsing (board.toml, or board.json).

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse JSON config file {path}: {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// board.toml structs
// ---------------------------------------------------------------------------

/// The complete board configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub application: ApplicationConfig,
    #[serde(default)]
    pub draft: DraftSettings,
    #[serde(default)]
    pub storage: StorageConfig,
    pub teams: Vec<TeamConfig>,
    pub players: Vec<String>,
}

/// Branding shown by the front-end. The engine never reads these.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            title: default_title(),
            logo: None,
            background_image: None,
        }
    }
}

fn default_title() -> String {
    "Draft Board".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftSettings {
    /// Upper bound on the number of rounds. When omitted the round count is
    /// derived from the player and team counts alone.
    #[serde(default)]
    pub rounds: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Persist the draft after every change. Off means every session starts
    /// fresh.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Database path. `None` lets the front-end choose a platform default.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            enabled: true,
            path: None,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub captain: String,
    /// Explicit round-1 pick priority.
    #[serde(default)]
    pub pick: Option<i64>,
}

impl BoardConfig {
    /// Number of rounds in the draft: enough rounds for every player to be
    /// picked, capped by `draft.rounds` when set.
    pub fn total_rounds(&self) -> usize {
        let teams = self.teams.len();
        if teams == 0 {
            return 0;
        }
        let calculated = self.players.len().div_ceil(teams);
        match self.draft.rounds {
            Some(cap) => calculated.min(cap),
            None => calculated,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Relative location of the board config inside a base directory.
pub const CONFIG_FILE: &str = "config/board.toml";

/// Relative location of the shipped default config.
pub const DEFAULTS_FILE: &str = "defaults/board.toml";

/// Load and validate a board configuration from `path`.
///
/// Files ending in `.json` are parsed as JSON; everything else as TOML.
pub fn load_config_from(path: &Path) -> Result<BoardConfig, ConfigError> {
    let text = read_file(path)?;
    let config = parse_config(path, &text)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(path: &Path, text: &str) -> Result<BoardConfig, ConfigError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(text).map_err(|e| ConfigError::JsonParseError {
            path: path.to_path_buf(),
            source: e,
        })
    } else {
        toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Ensure `config/board.toml` exists under `base_dir` by copying it from
/// `defaults/board.toml`. Returns the path that was written, or `None` when
/// nothing needed copying.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join(DEFAULTS_FILE);
    if !source.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found in {}; \
                 run from the project root or pass a config path",
                CONFIG_FILE,
                DEFAULTS_FILE,
                base_dir.display()
            ),
        });
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create config directory: {e}"),
        })?;
    }

    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "failed to copy {} to {}: {e}",
            source.display(),
            target.display()
        ),
    })?;

    Ok(Some(target))
}

/// Convenience wrapper: loads `config/board.toml` relative to the current
/// working directory, copying the default config first if needed.
pub fn load_config() -> Result<BoardConfig, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd.join(CONFIG_FILE))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate(config: &BoardConfig) -> Result<(), ConfigError> {
    if config.teams.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "teams".into(),
            message: "at least one team is required".into(),
        });
    }

    if config.players.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "players".into(),
            message: "at least one player is required".into(),
        });
    }

    if config.draft.rounds == Some(0) {
        return Err(ConfigError::ValidationError {
            field: "draft.rounds".into(),
            message: "must be greater than 0 when set".into(),
        });
    }

    for (idx, team) in config.teams.iter().enumerate() {
        if team.name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("teams[{idx}].name"),
                message: "must not be empty".into(),
            });
        }
    }

    let mut seen = HashSet::new();
    for player in &config.players {
        if !seen.insert(player.as_str()) {
            warn!("duplicate player name in config: '{}'", player);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
