//! Control enablement as a pure function of session state

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Pending, TEAM_CAPACITY};

/// Which controls accept input right now
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Affordances {
    pub start: bool,
    pub catch: bool,
    /// One flag per roster entry, in roster order
    pub battle: Vec<bool>,
    pub sync: bool,
}

impl Affordances {
    /// Derive the full enablement set.
    ///
    /// `team_size` is the size last reported by the service; the roster
    /// length is used as well so a lagging report can never re-open catch.
    pub fn derive(
        session_active: bool,
        team_size: usize,
        roster_len: usize,
        game_over: bool,
        pending: Pending,
    ) -> Self {
        let playing = session_active && !game_over;
        let full = team_size.max(roster_len) >= TEAM_CAPACITY;
        let can_battle = playing && !pending.battle;

        Self {
            start: !pending.start,
            catch: playing && !full && !pending.catch,
            battle: vec![can_battle; roster_len],
            sync: session_active && !pending.sync,
        }
    }

    pub fn battle_enabled(&self, index: usize) -> bool {
        self.battle.get(index).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_session_only_allows_start() {
        let affordances = Affordances::derive(false, 0, 0, false, Pending::default());
        assert!(affordances.start);
        assert!(!affordances.catch);
        assert!(!affordances.sync);
        assert!(affordances.battle.is_empty());
    }

    #[test]
    fn test_fresh_session_allows_catch() {
        let affordances = Affordances::derive(true, 0, 0, false, Pending::default());
        assert!(affordances.start);
        assert!(affordances.catch);
    }

    #[test]
    fn test_full_team_disables_catch() {
        let affordances = Affordances::derive(true, 6, 6, false, Pending::default());
        assert!(!affordances.catch);
        assert_eq!(affordances.battle, vec![true; 6]);
    }

    #[test]
    fn test_game_over_disables_catch_and_battles() {
        let affordances = Affordances::derive(true, 3, 3, true, Pending::default());
        assert!(affordances.start);
        assert!(!affordances.catch);
        assert_eq!(affordances.battle, vec![false; 3]);
        assert!(!affordances.battle_enabled(0));
    }

    #[test]
    fn test_pending_request_blocks_its_own_control() {
        let pending = Pending {
            catch: true,
            battle: true,
            ..Default::default()
        };
        let affordances = Affordances::derive(true, 2, 2, false, pending);
        assert!(!affordances.catch);
        assert!(!affordances.battle_enabled(1));
        assert!(affordances.start);

        let pending = Pending {
            start: true,
            ..Default::default()
        };
        let affordances = Affordances::derive(true, 2, 2, false, pending);
        assert!(!affordances.start);
        assert!(affordances.catch);
    }

    #[test]
    fn test_battle_enabled_out_of_range() {
        let affordances = Affordances::derive(true, 1, 1, false, Pending::default());
        assert!(affordances.battle_enabled(0));
        assert!(!affordances.battle_enabled(1));
    }
}
