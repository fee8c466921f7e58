// Draft order generation: round 1 by pick priority, round 2 reversed, and a
// right-to-left rotation for every round after that.

use tracing::{debug, warn};

use super::team::TeamId;

/// The fixed per-round pick order for a draft.
///
/// Each round holds every team exactly once. The order is a pure function of
/// the team priorities and the round count, so it is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftOrder {
    rounds: Vec<Vec<TeamId>>,
    team_count: usize,
}

impl DraftOrder {
    /// Number of rounds.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Number of teams picking in every round.
    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Team sequence for a 0-based round index.
    pub fn round(&self, round_idx: usize) -> Option<&[TeamId]> {
        self.rounds.get(round_idx).map(Vec::as_slice)
    }

    /// The team picking at `(round_idx, slot)`, both 0-based.
    pub fn team_at(&self, round_idx: usize, slot: usize) -> Option<TeamId> {
        self.rounds.get(round_idx)?.get(slot).copied()
    }

    /// Round 1 order, which is also the left-to-right column order of the board.
    pub fn first_round(&self) -> Option<&[TeamId]> {
        self.round(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[TeamId]> {
        self.rounds.iter().map(Vec::as_slice)
    }
}

/// Sort team indices by pick priority.
///
/// Teams without a priority go after every team that has one. The sort is
/// stable, so ties (and all unprioritized teams) keep their input order.
/// Zero and negative values are real priorities and sort numerically.
pub fn priority_order(priorities: &[Option<i64>]) -> Vec<TeamId> {
    let mut indices: Vec<TeamId> = (0..priorities.len()).collect();
    indices.sort_by_key(|&idx| match priorities[idx] {
        Some(pick) => (false, pick),
        None => (true, 0),
    });
    indices
}

/// Build the full draft order for `total_rounds` rounds.
///
/// - Round 1: teams sorted by priority (see [`priority_order`]).
/// - Round 2: round 1 reversed.
/// - Round r >= 3: starts at `round1[(n - (r - 1)) mod n]` and walks round 1
///   right to left, wrapping, for the remaining `n - 1` slots.
///
/// An empty team list is a caller error; it yields an empty order.
pub fn generate_draft_order(priorities: &[Option<i64>], total_rounds: usize) -> DraftOrder {
    let team_count = priorities.len();
    if team_count == 0 {
        warn!("generate_draft_order called with no teams, returning empty order");
        return DraftOrder::default();
    }

    let round1 = priority_order(priorities);
    let mut rounds: Vec<Vec<TeamId>> = Vec::with_capacity(total_rounds);

    for round_number in 1..=total_rounds {
        let order = match round_number {
            1 => round1.clone(),
            2 => round1.iter().rev().copied().collect(),
            r => rotated_round(&round1, r),
        };
        rounds.push(order);
    }

    debug!(
        "Generated draft order: {} teams x {} rounds, round 1 = {:?}",
        team_count, total_rounds, round1
    );

    DraftOrder { rounds, team_count }
}

/// Right-to-left walk through round 1 starting from the rotated position
/// for the 1-based `round_number`.
fn rotated_round(round1: &[TeamId], round_number: usize) -> Vec<TeamId> {
    let n = round1.len() as i64;
    let start = (n - (round_number as i64 - 1)).rem_euclid(n);
    (0..n)
        .map(|i| round1[(start - i).rem_euclid(n) as usize])
        .collect()
}
