//! Actions: user intents and service results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::{BattleResponse, CatchResponse, ScoreResponse, StartResponse, TeamResponse};

/// Application actions with automatic category inference.
///
/// Results carry the session id they were requested for so answers that
/// arrive after a new session started can be dropped.
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Session category =====
    /// Intent: start a new session (abandons the current one)
    SessionStart,

    /// Result: service issued a session id
    SessionDidStart(StartResponse),

    /// Result: start failed
    SessionDidError(String),

    // ===== Catch category =====
    /// Intent: catch a random creature
    CatchAttempt,

    CatchDidLoad {
        session: String,
        response: CatchResponse,
    },

    CatchDidError {
        session: String,
        error: String,
    },

    // ===== Battle category =====
    /// Intent: battle with the roster entry at this index
    BattleStart(usize),

    BattleDidLoad {
        session: String,
        response: BattleResponse,
    },

    BattleDidError {
        session: String,
        error: String,
    },

    // ===== Team category =====
    /// Intent: re-read team and score from the service
    TeamSync,

    TeamDidLoad {
        session: String,
        team: TeamResponse,
        score: ScoreResponse,
    },

    TeamDidError {
        session: String,
        error: String,
    },

    // ===== Roster category =====
    RosterSelectNext,
    RosterSelectPrev,
    /// Battle with the highlighted entry
    RosterConfirm,

    // ===== Notice category =====
    /// Timer fired for the notice with this id
    NoticeExpire(u64),

    // ===== Uncategorized (global) =====
    Quit,
}
