//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::api::{BattleResponse, CatchResponse, ScoreResponse, TeamResponse};
use crate::effect::Effect;
use crate::state::{AppState, Notice, NoticeKind, Pending, TEAM_CAPACITY};
use crate::view;

pub const START_OK: &str = "Game started! Catch some Pokemon!";
pub const START_FAILED: &str = "Failed to start game. Please try again.";
pub const CATCH_FAILED: &str = "Failed to catch Pokemon. Please try again.";
pub const TEAM_FULL: &str = "Your team is full! Time to battle!";
pub const BATTLE_FAILED: &str = "Failed to start battle. Please try again.";
pub const SYNC_FAILED: &str = "Failed to sync team. Please try again.";
pub const GAME_OVER: &str =
    "Game Over! You lost 3 consecutive battles. Start a new game to try again!";

/// The reducer handles all state transitions.
///
/// Affordances are recomputed after every transition that changed state.
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    let result = apply(state, action);
    if result.changed {
        state.refresh_affordances();
    }
    result
}

fn apply(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Session actions =====
        Action::SessionStart => {
            if !state.affordances.start {
                return DispatchResult::unchanged();
            }
            state.pending.start = true;
            DispatchResult::changed_with(Effect::StartSession)
        }

        Action::SessionDidStart(response) => {
            state.session = Some(response.session_id);
            state.roster.clear();
            state.team_size = 0;
            state.score = 0;
            state.game_over = false;
            state.battle = None;
            state.selected = 0;
            // Answers for the abandoned session are dropped on arrival
            state.pending = Pending::default();
            DispatchResult::changed_with(notify(state, START_OK, NoticeKind::Success))
        }

        Action::SessionDidError(_) => {
            state.pending.start = false;
            DispatchResult::changed_with(notify(state, START_FAILED, NoticeKind::Error))
        }

        // ===== Catch actions =====
        Action::CatchAttempt => {
            let Some(session) = state.session.clone() else {
                return DispatchResult::unchanged();
            };
            if !state.affordances.catch {
                return DispatchResult::unchanged();
            }
            state.pending.catch = true;
            DispatchResult::changed_with(Effect::Catch { session })
        }

        Action::CatchDidLoad { session, response } => {
            if !state.is_current(&session) {
                return DispatchResult::unchanged();
            }
            state.pending.catch = false;
            DispatchResult::changed_with(apply_catch(state, response))
        }

        Action::CatchDidError { session, .. } => {
            if !state.is_current(&session) {
                return DispatchResult::unchanged();
            }
            state.pending.catch = false;
            DispatchResult::changed_with(notify(state, CATCH_FAILED, NoticeKind::Error))
        }

        // ===== Battle actions =====
        Action::BattleStart(index) => {
            let Some(session) = state.session.clone() else {
                return DispatchResult::unchanged();
            };
            if !state.affordances.battle_enabled(index) {
                return DispatchResult::unchanged();
            }
            state.pending.battle = true;
            state.selected = index;
            DispatchResult::changed_with(Effect::Battle { session, index })
        }

        Action::BattleDidLoad { session, response } => {
            if !state.is_current(&session) {
                return DispatchResult::unchanged();
            }
            state.pending.battle = false;
            match apply_battle(state, response) {
                Some(effect) => DispatchResult::changed_with(effect),
                None => DispatchResult::changed(),
            }
        }

        Action::BattleDidError { session, .. } => {
            if !state.is_current(&session) {
                return DispatchResult::unchanged();
            }
            state.pending.battle = false;
            DispatchResult::changed_with(notify(state, BATTLE_FAILED, NoticeKind::Error))
        }

        // ===== Team actions =====
        Action::TeamSync => {
            let Some(session) = state.session.clone() else {
                return DispatchResult::unchanged();
            };
            if !state.affordances.sync {
                return DispatchResult::unchanged();
            }
            state.pending.sync = true;
            DispatchResult::changed_with(Effect::SyncTeam { session })
        }

        Action::TeamDidLoad {
            session,
            team,
            score,
        } => {
            if !state.is_current(&session) {
                return DispatchResult::unchanged();
            }
            state.pending.sync = false;
            DispatchResult::changed_with(apply_sync(state, team, score))
        }

        Action::TeamDidError { session, .. } => {
            if !state.is_current(&session) {
                return DispatchResult::unchanged();
            }
            state.pending.sync = false;
            DispatchResult::changed_with(notify(state, SYNC_FAILED, NoticeKind::Error))
        }

        // ===== Roster actions =====
        Action::RosterSelectNext => {
            if state.selected + 1 < state.roster.len() {
                state.selected += 1;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::RosterSelectPrev => {
            if state.selected > 0 && !state.roster.is_empty() {
                state.selected -= 1;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::RosterConfirm => {
            let index = state.selected;
            apply(state, Action::BattleStart(index))
        }

        // ===== Notice actions =====
        Action::NoticeExpire(id) => match &state.notice {
            Some(notice) if notice.id == id => {
                state.notice = None;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        // ===== Global actions =====
        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Replace the current notice and schedule its expiry
fn notify(state: &mut AppState, text: impl Into<String>, kind: NoticeKind) -> Effect {
    let id = state.next_notice_id;
    state.next_notice_id = state.next_notice_id.wrapping_add(1);
    state.notice = Some(Notice {
        id,
        text: text.into(),
        kind,
    });
    Effect::ExpireNotice { id }
}

fn apply_catch(state: &mut AppState, response: CatchResponse) -> Effect {
    let index = state.roster.len();
    let creature = view::creature(index, &response.pokemon);
    let caught = format!("You caught {}!", creature.name.to_uppercase());
    state.roster.push(creature);
    state.team_size = response.team_size;

    let expire = notify(state, caught, NoticeKind::Success);
    if response.team_size >= TEAM_CAPACITY {
        return notify(state, TEAM_FULL, NoticeKind::Success);
    }
    expire
}

fn apply_battle(state: &mut AppState, response: BattleResponse) -> Option<Effect> {
    state.battle = Some(view::battle_view(
        &response.message,
        &response.result,
        response.selected_pokemon.as_ref(),
        response.opponent_pokemon.as_ref(),
    ));
    state.score = response.score;
    if response.game_over {
        return Some(end_game(state));
    }
    None
}

fn apply_sync(state: &mut AppState, team: TeamResponse, score: ScoreResponse) -> Effect {
    // Append-only: entries already on screen keep their card and index
    let known = state.roster.len();
    for (index, pokemon) in team
        .team
        .iter()
        .enumerate()
        .take(TEAM_CAPACITY)
        .skip(known)
    {
        state.roster.push(view::creature(index, pokemon));
    }
    state.team_size = team.team_size;
    state.score = score.score;

    if score.game_over && !state.game_over {
        return end_game(state);
    }
    let synced = format!("Team synced {}", view::team_counter(state.team_size));
    notify(state, synced, NoticeKind::Success)
}

fn end_game(state: &mut AppState) -> Effect {
    state.game_over = true;
    notify(state, GAME_OVER, NoticeKind::Error)
}
