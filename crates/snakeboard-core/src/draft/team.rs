// Team representation on the draft board.

use serde::{Deserialize, Serialize};

use crate::config::TeamConfig;

/// Positional index of a team in the configured team list.
pub type TeamId = usize;

/// A team taking part in the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Index into the configured team list.
    pub id: TeamId,
    pub name: String,
    /// Display color (any CSS-style string, e.g. "#c0392b").
    pub color: String,
    pub captain: String,
    /// Explicit round-1 pick priority. Lower picks earlier; `None` picks after
    /// every team that has one.
    pub pick: Option<i64>,
}

impl Team {
    pub fn from_config(id: TeamId, config: &TeamConfig) -> Self {
        Team {
            id,
            name: config.name.clone(),
            color: config.color.clone(),
            captain: config.captain.clone(),
            pick: config.pick,
        }
    }
}
