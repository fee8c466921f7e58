// Individual pick representation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::team::TeamId;

/// A single recorded selection. Appended to the history on select and popped
/// on undo; never modified in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    /// Name of the selected player.
    pub player: String,
    /// 1-based round in which the pick was made.
    pub round: usize,
    /// Team that made the pick.
    pub team: TeamId,
}

impl Pick {
    pub fn new(player: impl Into<String>, round: usize, team: TeamId) -> Self {
        Pick {
            player: player.into(),
            round,
            team,
        }
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{} team {}: {}", self.round, self.team, self.player)
    }
}
