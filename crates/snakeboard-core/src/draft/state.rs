// Draft state: cursor, pick history, remaining player pool, and the
// select/undo/reset transitions over a fixed draft order.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::order::{generate_draft_order, DraftOrder};
use super::pick::Pick;
use super::team::{Team, TeamId};
use crate::config::{validate, BoardConfig, ConfigError, TeamConfig};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A transition that was rejected before anything was mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("the draft is complete")]
    DraftComplete,

    #[error("player '{0}' is not in the remaining pool")]
    UnknownPlayer(String),

    #[error("no picks to undo")]
    NothingToUndo,
}

/// A persisted state that does not fit the current draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("cursor (round {round}, slot {slot}) is outside a {rounds}-round, {teams}-team draft")]
    CursorOutOfRange {
        round: usize,
        slot: usize,
        rounds: usize,
        teams: usize,
    },

    #[error("cursor expects {expected} picks but history has {actual}")]
    PickCountMismatch { expected: usize, actual: usize },

    #[error("pick #{index} ({player}) does not match the draft order")]
    PickMismatch { index: usize, player: String },

    #[error("picked and remaining players do not add up to the configured pool")]
    PoolMismatch,
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// Whether more picks can be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStatus {
    InProgress,
    Complete,
}

/// The next pick to be made, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPick {
    /// 0-based round index.
    pub round_index: usize,
    pub team: TeamId,
    /// 1-based position within the round.
    pub slot_number: usize,
}

/// The mutable part of a draft. This is what gets persisted; the order is
/// re-derived from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftState {
    /// 0-based index of the round holding the next pick.
    pub current_round: usize,
    /// 0-based slot of the next pick within `current_round`.
    pub current_team_slot: usize,
    /// All picks in the order they were made.
    pub picks: Vec<Pick>,
    /// Players still available, kept sorted.
    pub remaining_players: Vec<String>,
}

impl DraftState {
    fn fresh(pool: &[String]) -> Self {
        DraftState {
            current_round: 0,
            current_team_slot: 0,
            picks: Vec::new(),
            remaining_players: pool.to_vec(),
        }
    }

    /// Number of picks made so far.
    pub fn pick_count(&self) -> usize {
        self.picks.len()
    }

    pub fn last_pick(&self) -> Option<&Pick> {
        self.picks.last()
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// A single draft session: fixed teams, order and player pool, plus the
/// mutable [`DraftState`].
#[derive(Debug, Clone)]
pub struct Draft {
    teams: Vec<Team>,
    order: DraftOrder,
    /// The configured pool, sorted. `reset` restores from this.
    players: Vec<String>,
    state: DraftState,
}

impl Draft {
    /// Build a draft from a loaded configuration.
    pub fn initialize(config: &BoardConfig) -> Result<Self, ConfigError> {
        validate(config)?;
        Self::new(&config.teams, &config.players, config.total_rounds())
    }

    /// Build a draft from explicit teams, players and round count.
    pub fn new(
        teams: &[TeamConfig],
        players: &[String],
        total_rounds: usize,
    ) -> Result<Self, ConfigError> {
        if teams.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "teams".into(),
                message: "at least one team is required".into(),
            });
        }
        if total_rounds == 0 {
            return Err(ConfigError::ValidationError {
                field: "draft.rounds".into(),
                message: "no rounds can be derived from the configuration".into(),
            });
        }

        let teams: Vec<Team> = teams
            .iter()
            .enumerate()
            .map(|(id, t)| Team::from_config(id, t))
            .collect();
        let priorities: Vec<Option<i64>> = teams.iter().map(|t| t.pick).collect();
        let order = generate_draft_order(&priorities, total_rounds);

        let mut players = players.to_vec();
        players.sort();

        info!(
            "Draft initialized: {} teams, {} players, {} rounds",
            teams.len(),
            players.len(),
            total_rounds
        );

        let state = DraftState::fresh(&players);
        Ok(Draft {
            teams,
            order,
            players,
            state,
        })
    }

    // --- Accessors ---

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn order(&self) -> &DraftOrder {
        &self.order
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id)
    }

    pub fn total_rounds(&self) -> usize {
        self.order.len()
    }

    /// The full configured pool, sorted.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn status(&self) -> DraftStatus {
        if self.state.current_round >= self.total_rounds()
            || self.state.remaining_players.is_empty()
        {
            DraftStatus::Complete
        } else {
            DraftStatus::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == DraftStatus::Complete
    }

    /// The pick the cursor points at, or `None` once the draft is complete.
    pub fn peek_next_pick(&self) -> Option<NextPick> {
        if self.is_complete() {
            return None;
        }
        let team = self
            .order
            .team_at(self.state.current_round, self.state.current_team_slot)?;
        Some(NextPick {
            round_index: self.state.current_round,
            team,
            slot_number: self.state.current_team_slot + 1,
        })
    }

    // --- Transitions ---

    /// Record `player` as the next pick and advance the cursor.
    ///
    /// Rejected without mutating anything when the draft is complete or the
    /// player is not in the remaining pool.
    pub fn select_player(&mut self, player: &str) -> Result<&DraftState, TransitionError> {
        let Some(next) = self.peek_next_pick() else {
            warn!("Rejected pick of '{}': draft is complete", player);
            return Err(TransitionError::DraftComplete);
        };

        let Some(pool_idx) = self.state.remaining_players.iter().position(|p| p == player)
        else {
            warn!("Rejected pick of '{}': not in the remaining pool", player);
            return Err(TransitionError::UnknownPlayer(player.to_string()));
        };

        let name = self.state.remaining_players.remove(pool_idx);
        let pick = Pick::new(name, next.round_index + 1, next.team);
        info!(
            "Pick {}: round {} slot {} -> {} takes {}",
            self.state.picks.len() + 1,
            pick.round,
            next.slot_number,
            self.team_name(pick.team),
            pick.player
        );
        self.state.picks.push(pick);

        self.state.current_team_slot += 1;
        if self.state.current_team_slot >= self.order.team_count() {
            self.state.current_team_slot = 0;
            self.state.current_round += 1;
        }

        Ok(&self.state)
    }

    /// Take back the most recent pick, returning its player to the pool and
    /// stepping the cursor back to where it was before that pick.
    pub fn undo_last_pick(&mut self) -> Result<&DraftState, TransitionError> {
        let Some(pick) = self.state.picks.pop() else {
            return Err(TransitionError::NothingToUndo);
        };

        info!(
            "Undo: {} returns to the pool (round {}, {})",
            pick.player,
            pick.round,
            self.team_name(pick.team)
        );
        insert_sorted(&mut self.state.remaining_players, pick.player);

        if self.state.current_team_slot == 0 {
            self.state.current_round -= 1;
            self.state.current_team_slot = self.order.team_count() - 1;
        } else {
            self.state.current_team_slot -= 1;
        }

        Ok(&self.state)
    }

    /// Clear every pick and restore the full pool. The draft order is kept.
    pub fn reset(&mut self) -> &DraftState {
        info!("Draft reset ({} picks cleared)", self.state.picks.len());
        self.state = DraftState::fresh(&self.players);
        &self.state
    }

    /// Replace the current state with a previously persisted one.
    ///
    /// The state must be reachable from a fresh draft by a sequence of
    /// selections under this draft's order and pool; otherwise it is
    /// rejected and the current state is left as is.
    pub fn restore(&mut self, mut state: DraftState) -> Result<&DraftState, StateError> {
        let teams = self.order.team_count();
        let rounds = self.total_rounds();

        let cursor_ok = state.current_team_slot < teams
            && (state.current_round < rounds
                || (state.current_round == rounds && state.current_team_slot == 0));
        if !cursor_ok {
            return Err(StateError::CursorOutOfRange {
                round: state.current_round,
                slot: state.current_team_slot,
                rounds,
                teams,
            });
        }

        let expected = state.current_round * teams + state.current_team_slot;
        if state.picks.len() != expected {
            return Err(StateError::PickCountMismatch {
                expected,
                actual: state.picks.len(),
            });
        }

        for (index, pick) in state.picks.iter().enumerate() {
            let (round_idx, slot) = (index / teams, index % teams);
            if pick.round != round_idx + 1 || self.order.team_at(round_idx, slot) != Some(pick.team)
            {
                return Err(StateError::PickMismatch {
                    index: index + 1,
                    player: pick.player.clone(),
                });
            }
        }

        state.remaining_players.sort();
        let mut accounted: Vec<&str> = state
            .picks
            .iter()
            .map(|p| p.player.as_str())
            .chain(state.remaining_players.iter().map(String::as_str))
            .collect();
        accounted.sort_unstable();
        if !accounted.iter().copied().eq(self.players.iter().map(String::as_str)) {
            return Err(StateError::PoolMismatch);
        }

        info!(
            "Draft restored: {} picks, {} players remaining",
            state.picks.len(),
            state.remaining_players.len()
        );
        self.state = state;
        Ok(&self.state)
    }

    fn team_name(&self, id: TeamId) -> &str {
        self.teams.get(id).map(|t| t.name.as_str()).unwrap_or("?")
    }
}

/// Insert `name` at its sorted position.
fn insert_sorted(pool: &mut Vec<String>, name: String) {
    let idx = pool.partition_point(|p| *p <= name);
    pool.insert(idx, name);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, pick: Option<i64>) -> TeamConfig {
        TeamConfig {
            name: name.to_string(),
            color: "#000000".to_string(),
            captain: format!("{name} captain"),
            pick,
        }
    }

    fn four_teams() -> Vec<TeamConfig> {
        vec![
            team("A", Some(1)),
            team("B", Some(2)),
            team("C", Some(3)),
            team("D", Some(4)),
        ]
    }

    fn players(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Player {i:02}")).collect()
    }

    fn test_draft(player_count: usize, rounds: usize) -> Draft {
        Draft::new(&four_teams(), &players(player_count), rounds).expect("valid draft")
    }

    #[test]
    fn new_draft_starts_at_first_pick() {
        let draft = test_draft(8, 2);
        assert_eq!(draft.status(), DraftStatus::InProgress);
        assert_eq!(draft.state().current_round, 0);
        assert_eq!(draft.state().current_team_slot, 0);
        assert!(draft.state().picks.is_empty());
        assert_eq!(draft.state().remaining_players.len(), 8);
        assert_eq!(
            draft.peek_next_pick(),
            Some(NextPick {
                round_index: 0,
                team: 0,
                slot_number: 1
            })
        );
    }

    #[test]
    fn new_rejects_no_teams_and_no_rounds() {
        assert!(matches!(
            Draft::new(&[], &players(3), 1),
            Err(ConfigError::ValidationError { .. })
        ));
        assert!(matches!(
            Draft::new(&four_teams(), &players(3), 0),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn pool_is_sorted_on_creation() {
        let pool = vec!["Zed".to_string(), "amy".to_string(), "Bob".to_string()];
        let draft = Draft::new(&four_teams(), &pool, 1).unwrap();
        assert_eq!(draft.state().remaining_players, vec!["Bob", "Zed", "amy"]);
        assert_eq!(draft.players().to_vec(), vec!["Bob", "Zed", "amy"]);
    }

    #[test]
    fn select_records_pick_and_advances() {
        let mut draft = test_draft(8, 2);
        let state = draft.select_player("Player 05").unwrap();

        assert_eq!(state.picks, vec![Pick::new("Player 05", 1, 0)]);
        assert!(!state.remaining_players.contains(&"Player 05".to_string()));
        assert_eq!(state.remaining_players.len(), 7);
        assert_eq!(state.current_round, 0);
        assert_eq!(state.current_team_slot, 1);
    }

    #[test]
    fn select_wraps_to_next_round_in_snake_order() {
        let mut draft = test_draft(8, 2);
        for i in 1..=4 {
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        assert_eq!(draft.state().current_round, 1);
        assert_eq!(draft.state().current_team_slot, 0);
        // Round 2 is reversed: team D picks first
        assert_eq!(draft.peek_next_pick().unwrap().team, 3);

        draft.select_player("Player 05").unwrap();
        assert_eq!(draft.state().last_pick(), Some(&Pick::new("Player 05", 2, 3)));
    }

    #[test]
    fn picks_follow_rotated_order_in_later_rounds() {
        let mut draft = test_draft(16, 4);
        for i in 1..=16 {
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        let teams: Vec<TeamId> = draft.state().picks.iter().map(|p| p.team).collect();
        assert_eq!(
            teams,
            vec![0, 1, 2, 3, 3, 2, 1, 0, 2, 1, 0, 3, 1, 0, 3, 2]
        );
        assert!(draft.is_complete());
    }

    #[test]
    fn unknown_player_is_rejected_without_mutation() {
        let mut draft = test_draft(8, 2);
        draft.select_player("Player 01").unwrap();
        let before = draft.state().clone();

        let err = draft.select_player("Nobody").unwrap_err();
        assert_eq!(err, TransitionError::UnknownPlayer("Nobody".to_string()));
        assert_eq!(draft.state(), &before);

        // Already-picked players are no longer in the pool either
        let err = draft.select_player("Player 01").unwrap_err();
        assert!(matches!(err, TransitionError::UnknownPlayer(_)));
        assert_eq!(draft.state(), &before);
    }

    #[test]
    fn select_after_round_limit_is_rejected() {
        // 10 players but only 2 rounds of 4 teams: the round limit ends the draft
        let mut draft = test_draft(10, 2);
        for i in 1..=8 {
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        assert!(draft.is_complete());
        assert_eq!(draft.state().current_round, 2);
        assert_eq!(draft.state().remaining_players.len(), 2);
        assert_eq!(draft.peek_next_pick(), None);

        let before = draft.state().clone();
        assert_eq!(
            draft.select_player("Player 09").unwrap_err(),
            TransitionError::DraftComplete
        );
        assert_eq!(draft.state(), &before);
    }

    #[test]
    fn empty_pool_completes_draft_mid_round() {
        // 6 players, 4 teams -> 2 rounds, pool empties at round 2 slot 2
        let mut draft = test_draft(6, 2);
        for i in 1..=6 {
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        assert_eq!(draft.state().current_round, 1);
        assert_eq!(draft.state().current_team_slot, 2);
        assert!(draft.state().remaining_players.is_empty());
        assert_eq!(draft.status(), DraftStatus::Complete);
        assert_eq!(
            draft.select_player("Player 01").unwrap_err(),
            TransitionError::DraftComplete
        );
    }

    #[test]
    fn exact_multiple_finishes_rounds_and_pool_together() {
        let mut draft = test_draft(8, 2);
        for i in 1..=8 {
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        assert_eq!(draft.state().current_round, 2);
        assert_eq!(draft.state().current_team_slot, 0);
        assert!(draft.state().remaining_players.is_empty());
    }

    #[test]
    fn select_then_undo_restores_state_exactly() {
        let mut draft = test_draft(8, 2);
        for i in [3, 7, 1] {
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        let before = draft.state().clone();

        draft.select_player("Player 05").unwrap();
        draft.undo_last_pick().unwrap();

        assert_eq!(draft.state(), &before);
    }

    #[test]
    fn undo_across_round_boundary() {
        let mut draft = test_draft(8, 2);
        for i in 1..=4 {
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        assert_eq!(
            (draft.state().current_round, draft.state().current_team_slot),
            (1, 0)
        );

        let state = draft.undo_last_pick().unwrap();
        assert_eq!((state.current_round, state.current_team_slot), (0, 3));
        assert_eq!(state.picks.len(), 3);
        assert!(state.remaining_players.contains(&"Player 04".to_string()));
    }

    #[test]
    fn undo_reopens_completed_draft() {
        let mut draft = test_draft(6, 2);
        for i in 1..=6 {
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        assert!(draft.is_complete());

        draft.undo_last_pick().unwrap();
        assert_eq!(draft.status(), DraftStatus::InProgress);
        assert_eq!(draft.state().remaining_players, vec!["Player 06"]);
    }

    #[test]
    fn undo_on_fresh_draft_is_noop() {
        let mut draft = test_draft(8, 2);
        let before = draft.state().clone();
        assert_eq!(
            draft.undo_last_pick().unwrap_err(),
            TransitionError::NothingToUndo
        );
        assert_eq!(draft.state(), &before);
    }

    #[test]
    fn undo_reinserts_in_sorted_position() {
        let mut draft = test_draft(5, 2);
        draft.select_player("Player 03").unwrap();
        draft.undo_last_pick().unwrap();
        assert_eq!(draft.state().remaining_players, players(5));
    }

    #[test]
    fn duplicate_names_remove_one_at_a_time() {
        let pool = vec!["Sam".to_string(), "Sam".to_string(), "Ann".to_string()];
        let mut draft = Draft::new(&four_teams(), &pool, 1).unwrap();

        draft.select_player("Sam").unwrap();
        assert_eq!(draft.state().remaining_players, vec!["Ann", "Sam"]);
        draft.select_player("Sam").unwrap();
        assert_eq!(draft.state().remaining_players, vec!["Ann"]);

        draft.undo_last_pick().unwrap();
        assert_eq!(draft.state().remaining_players, vec!["Ann", "Sam"]);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut draft = test_draft(8, 2);
        let initial = draft.state().clone();

        for i in 1..=6 {
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        draft.undo_last_pick().unwrap();
        let order_before = draft.order().clone();

        let state = draft.reset();
        assert_eq!(state, &initial);
        assert_eq!(draft.order(), &order_before);

        // Idempotent
        draft.reset();
        assert_eq!(draft.state(), &initial);
    }

    #[test]
    fn single_team_draft_picks_every_round() {
        let mut draft = Draft::new(&[team("Solo", None)], &players(3), 3).unwrap();
        for i in 1..=3 {
            let next = draft.peek_next_pick().unwrap();
            assert_eq!(next.team, 0);
            assert_eq!(next.round_index, i - 1);
            assert_eq!(next.slot_number, 1);
            draft.select_player(&format!("Player {i:02}")).unwrap();
        }
        assert!(draft.is_complete());
        assert_eq!(draft.state().current_round, 3);

        draft.undo_last_pick().unwrap();
        assert_eq!(draft.state().current_round, 2);
        assert_eq!(draft.state().current_team_slot, 0);
    }

    #[test]
    fn priority_drives_first_pick() {
        let teams = vec![team("Late", None), team("Second", Some(2)), team("First", Some(1))];
        let mut draft = Draft::new(&teams, &players(3), 1).unwrap();
        assert_eq!(draft.peek_next_pick().unwrap().team, 2);
        draft.select_player("Player 01").unwrap();
        assert_eq!(draft.peek_next_pick().unwrap().team, 1);
        draft.select_player("Player 02").unwrap();
        assert_eq!(draft.peek_next_pick().unwrap().team, 0);
    }

    // --- Restore ---

    #[test]
    fn restore_accepts_a_reachable_state() {
        let mut source = test_draft(8, 2);
        for i in [2, 4, 6, 8, 1] {
            source.select_player(&format!("Player {i:02}")).unwrap();
        }
        let saved = source.state().clone();

        let mut fresh = test_draft(8, 2);
        fresh.restore(saved.clone()).unwrap();
        assert_eq!(fresh.state(), &saved);
        assert_eq!(fresh.peek_next_pick(), source.peek_next_pick());
    }

    #[test]
    fn restore_accepts_completed_draft() {
        let mut source = test_draft(8, 2);
        for i in 1..=8 {
            source.select_player(&format!("Player {i:02}")).unwrap();
        }
        let mut fresh = test_draft(8, 2);
        fresh.restore(source.state().clone()).unwrap();
        assert!(fresh.is_complete());
    }

    #[test]
    fn restore_sorts_remaining_pool() {
        let mut source = test_draft(8, 2);
        source.select_player("Player 01").unwrap();
        let mut saved = source.state().clone();
        saved.remaining_players.reverse();

        let mut fresh = test_draft(8, 2);
        let state = fresh.restore(saved).unwrap();
        assert_eq!(state.remaining_players, source.state().remaining_players);
    }

    #[test]
    fn restore_rejects_cursor_out_of_range() {
        let mut draft = test_draft(8, 2);
        let state = DraftState {
            current_round: 0,
            current_team_slot: 4,
            ..draft.state().clone()
        };
        assert!(matches!(
            draft.restore(state),
            Err(StateError::CursorOutOfRange { .. })
        ));
        assert_eq!(draft.state().pick_count(), 0);
    }

    #[test]
    fn restore_rejects_pick_count_mismatch() {
        let mut draft = test_draft(8, 2);
        let state = DraftState {
            current_team_slot: 1,
            ..draft.state().clone()
        };
        assert_eq!(
            draft.restore(state).unwrap_err(),
            StateError::PickCountMismatch {
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn restore_rejects_pick_for_wrong_team() {
        let mut draft = test_draft(8, 2);
        let mut pool = players(8);
        pool.remove(0);
        let state = DraftState {
            current_round: 0,
            current_team_slot: 1,
            picks: vec![Pick::new("Player 01", 1, 2)],
            remaining_players: pool,
        };
        assert!(matches!(
            draft.restore(state),
            Err(StateError::PickMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn restore_rejects_foreign_players() {
        let mut draft = test_draft(8, 2);
        let mut pool = players(8);
        pool.remove(0);
        let state = DraftState {
            current_round: 0,
            current_team_slot: 1,
            picks: vec![Pick::new("Stranger", 1, 0)],
            remaining_players: pool,
        };
        assert_eq!(draft.restore(state).unwrap_err(), StateError::PoolMismatch);
        assert_eq!(draft.state().remaining_players.len(), 8);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut draft = test_draft(8, 2);
        draft.select_player("Player 02").unwrap();
        let json = serde_json::to_string(draft.state()).unwrap();
        let back: DraftState = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, draft.state());
    }

    #[test]
    fn initialize_from_config() {
        let config: BoardConfig = toml::from_str(
            r#"
players = ["A", "B", "C"]

[[teams]]
name = "Red"

[[teams]]
name = "Blue"
pick = 1
"#,
        )
        .unwrap();
        let draft = Draft::initialize(&config).unwrap();
        assert_eq!(draft.total_rounds(), 2);
        assert_eq!(draft.teams()[1].name, "Blue");
        assert_eq!(draft.order().first_round(), Some(&[1, 0][..]));
    }
}
