// Read-only grid view of a draft: one column per team in round-1 order, one
// cell per round.

use super::state::{Draft, NextPick};
use super::team::TeamId;

/// A team column on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    pub team: TeamId,
    pub name: String,
    pub color: String,
    pub captain: String,
    /// Player picked in each round, indexed by 0-based round.
    pub cells: Vec<Option<String>>,
}

/// Snapshot of the whole board for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub total_rounds: usize,
    /// Columns left to right, in round-1 pick order.
    pub columns: Vec<BoardColumn>,
    /// The highlighted pick, `None` once the draft is complete.
    pub next_pick: Option<NextPick>,
}

impl Board {
    /// Column for a given team.
    pub fn column(&self, team: TeamId) -> Option<&BoardColumn> {
        self.columns.iter().find(|c| c.team == team)
    }

    /// Index of the highlighted column, if any.
    pub fn active_column(&self) -> Option<usize> {
        let next = self.next_pick?;
        self.columns.iter().position(|c| c.team == next.team)
    }
}

impl Draft {
    /// Project the current state onto the team x round grid.
    pub fn board(&self) -> Board {
        let total_rounds = self.total_rounds();
        let column_order = self.order().first_round().unwrap_or(&[]);

        let mut columns: Vec<BoardColumn> = column_order
            .iter()
            .filter_map(|&id| self.team(id))
            .map(|team| BoardColumn {
                team: team.id,
                name: team.name.clone(),
                color: team.color.clone(),
                captain: team.captain.clone(),
                cells: vec![None; total_rounds],
            })
            .collect();

        for pick in &self.state().picks {
            let Some(column) = columns.iter_mut().find(|c| c.team == pick.team) else {
                continue;
            };
            if let Some(cell) = pick
                .round
                .checked_sub(1)
                .and_then(|idx| column.cells.get_mut(idx))
            {
                *cell = Some(pick.player.clone());
            }
        }

        Board {
            total_rounds,
            columns,
            next_pick: self.peek_next_pick(),
        }
    }
}
