//! Session flows through EffectStoreTestHarness
//!
//! Each test drives the store the way the running app does: dispatch an
//! intent, check the declared effect, then feed back the service result.

use pokebattle::{
    action::Action,
    api::{BattleResponse, CatchResponse, StartResponse},
    effect::Effect,
    reducer::{self, reducer},
    state::AppState,
    view,
};
use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;

fn start_response(id: &str) -> StartResponse {
    StartResponse {
        session_id: id.into(),
        message: Some("Game started!".into()),
    }
}

fn catch_response(body: &str) -> CatchResponse {
    serde_json::from_str(body).expect("valid catch body")
}

fn pikachu(team_size: usize) -> CatchResponse {
    catch_response(&format!(
        r#"{{
            "message": "You caught Pikachu!",
            "team_size": {team_size},
            "pokemon": {{
                "name": "pikachu",
                "sprites": {{"front_default": "https://img/25.png"}},
                "stats": [
                    {{"base_stat": 35, "stat": {{"name": "hp"}}}},
                    {{"base_stat": 55, "stat": {{"name": "attack"}}}},
                    {{"base_stat": 40, "stat": {{"name": "defense"}}}},
                    {{"base_stat": 50, "stat": {{"name": "special-attack"}}}},
                    {{"base_stat": 50, "stat": {{"name": "special-defense"}}}},
                    {{"base_stat": 90, "stat": {{"name": "speed"}}}}
                ]
            }}
        }}"#
    ))
}

/// State right after session "s-1" started
fn started_state() -> AppState {
    let mut state = AppState::default();
    reducer(&mut state, Action::SessionStart);
    reducer(&mut state, Action::SessionDidStart(start_response("s-1")));
    state
}

#[test]
fn test_start_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SessionStart);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::StartSession));

    harness.complete_action(Action::SessionDidStart(start_response("s-1")));
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| s.session.as_deref() == Some("s-1"));
    harness.assert_state(|s| s.roster.is_empty());
    harness.assert_state(|s| s.score == 0);
    harness.assert_state(|s| view::team_counter(s.team_size) == "(0/6)");
    harness.assert_state(|s| s.affordances.catch);
    harness.assert_state(|s| {
        s.notice
            .as_ref()
            .is_some_and(|n| n.text == reducer::START_OK && !n.is_error())
    });

    // The start notice schedules its own expiry
    let effects = harness.drain_effects();
    effects.effects_all_match(|e| matches!(e, Effect::ExpireNotice { .. }));
}

#[test]
fn test_catch_scenario() {
    let mut harness = EffectStoreTestHarness::new(started_state(), reducer);

    harness.dispatch_collect(Action::CatchAttempt);
    let effects = harness.drain_effects();
    effects.effects_first_matches(|e| matches!(e, Effect::Catch { session } if session == "s-1"));

    harness.complete_action(Action::CatchDidLoad {
        session: "s-1".into(),
        response: pikachu(1),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.roster.len() == 1);
    harness.assert_state(|s| s.roster[0].name == "pikachu");
    harness.assert_state(|s| s.roster[0].power == 320);
    harness.assert_state(|s| view::team_counter(s.team_size) == "(1/6)");
    harness.assert_state(|s| s.affordances.catch);
}

#[test]
fn test_team_full_is_terminal_for_catch() {
    let mut harness = EffectStoreTestHarness::new(started_state(), reducer);
    for size in 1..=6 {
        harness.dispatch_collect(Action::CatchAttempt);
        harness.complete_action(Action::CatchDidLoad {
            session: "s-1".into(),
            response: pikachu(size),
        });
        harness.process_emitted();
    }
    harness.drain_effects();

    harness.assert_state(|s| !s.affordances.catch);
    harness.assert_state(|s| {
        s.notice
            .as_ref()
            .is_some_and(|n| n.text == reducer::TEAM_FULL)
    });

    harness.dispatch_collect(Action::CatchAttempt);
    harness.drain_effects().effects_empty();

    // Only a new session re-opens catch
    harness.dispatch_collect(Action::SessionStart);
    harness.complete_action(Action::SessionDidStart(start_response("s-2")));
    harness.process_emitted();
    harness.assert_state(|s| s.affordances.catch && s.roster.is_empty());
}

#[test]
fn test_battle_scenario() {
    let mut harness = EffectStoreTestHarness::new(started_state(), reducer);
    harness.dispatch_collect(Action::CatchAttempt);
    harness.complete_action(Action::CatchDidLoad {
        session: "s-1".into(),
        response: pikachu(1),
    });
    harness.process_emitted();
    harness.drain_effects();

    harness.dispatch_collect(Action::BattleStart(0));
    let effects = harness.drain_effects();
    effects.effects_first_matches(
        |e| matches!(e, Effect::Battle { session, index: 0 } if session == "s-1"),
    );

    let response: BattleResponse = serde_json::from_str(
        r#"{
            "message": "It's super effective!",
            "result": "You win!",
            "score": 10,
            "game_over": false,
            "selected_pokemon": {"name": "pikachu", "stats": [{"base_stat": 35, "stat": {"name": "hp"}}]},
            "opponent_pokemon": null
        }"#,
    )
    .expect("valid battle body");
    harness.complete_action(Action::BattleDidLoad {
        session: "s-1".into(),
        response,
    });
    harness.process_emitted();

    harness.assert_state(|s| s.battle.is_some());
    harness.assert_state(|s| s.battle.as_ref().unwrap().message == "It's super effective! You win!");
    harness.assert_state(|s| s.score == 10);
    harness.assert_state(|s| s.battle.as_ref().unwrap().opponent.name == "Unknown");
    harness.assert_state(|s| s.battle.as_ref().unwrap().player.power == 35);
    harness.assert_state(|s| !s.game_over);
}

#[test]
fn test_game_over_flow() {
    let mut harness = EffectStoreTestHarness::new(started_state(), reducer);
    for size in 1..=2 {
        harness.dispatch_collect(Action::CatchAttempt);
        harness.complete_action(Action::CatchDidLoad {
            session: "s-1".into(),
            response: pikachu(size),
        });
        harness.process_emitted();
    }

    harness.dispatch_collect(Action::BattleStart(1));
    harness.complete_action(Action::BattleDidLoad {
        session: "s-1".into(),
        response: BattleResponse {
            message: "Battle between Pikachu and Mewtwo!".into(),
            result: "You lost the battle!".into(),
            score: 0,
            game_over: true,
            selected_pokemon: None,
            opponent_pokemon: None,
        },
    });
    harness.process_emitted();

    harness.assert_state(|s| s.game_over);
    harness.assert_state(|s| s.affordances.start);
    harness.assert_state(|s| !s.affordances.catch);
    harness.assert_state(|s| s.affordances.battle.iter().all(|enabled| !enabled));
    harness.assert_state(|s| {
        s.notice
            .as_ref()
            .is_some_and(|n| n.is_error() && n.text == reducer::GAME_OVER)
    });
    harness.drain_effects();

    harness.dispatch_collect(Action::BattleStart(0));
    harness.dispatch_collect(Action::CatchAttempt);
    harness
        .drain_effects()
        .effects_none_match(|e| matches!(e, Effect::Battle { .. } | Effect::Catch { .. }));
}

#[test]
fn test_failures_leave_state_untouched() {
    let mut harness = EffectStoreTestHarness::new(started_state(), reducer);
    harness.dispatch_collect(Action::CatchAttempt);
    harness.complete_action(Action::CatchDidLoad {
        session: "s-1".into(),
        response: pikachu(1),
    });
    harness.process_emitted();

    let failures = [
        (Action::SessionStart, Action::SessionDidError("refused".into())),
        (
            Action::CatchAttempt,
            Action::CatchDidError {
                session: "s-1".into(),
                error: "503".into(),
            },
        ),
        (
            Action::BattleStart(0),
            Action::BattleDidError {
                session: "s-1".into(),
                error: "not json".into(),
            },
        ),
    ];

    for (intent, failure) in failures {
        harness.dispatch_collect(intent);
        harness.complete_action(failure);
        harness.process_emitted();

        harness.assert_state(|s| s.session.as_deref() == Some("s-1"));
        harness.assert_state(|s| s.roster.len() == 1);
        harness.assert_state(|s| s.score == 0);
        harness.assert_state(|s| s.battle.is_none());
        harness.assert_state(|s| s.notice.as_ref().is_some_and(|n| n.is_error()));
    }
}

#[test]
fn test_double_press_sends_one_request() {
    let mut harness = EffectStoreTestHarness::new(started_state(), reducer);
    harness.dispatch_collect(Action::CatchAttempt);
    harness.dispatch_collect(Action::CatchAttempt);
    harness.drain_effects().effects_count(1);
    harness.assert_state(|s| s.pending.catch && !s.affordances.catch);
}

#[test]
fn test_notice_expires() {
    let state = started_state();
    let id = state.notice.as_ref().map(|n| n.id).unwrap_or_default();
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.complete_action(Action::NoticeExpire(id));
    harness.process_emitted();
    harness.assert_state(|s| s.notice.is_none());
}
