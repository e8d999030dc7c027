//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::affordance::Affordances;

/// Maximum number of creatures a session can hold.
pub const TEAM_CAPACITY: usize = 6;

/// How long a notice stays on screen.
pub const NOTICE_TTL_MS: u64 = 3_000;

/// Sprite shown when the service sends a combatant without one.
pub const FALLBACK_SPRITE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/0.png";

/// Name shown when the service sends a combatant without one.
pub const UNKNOWN_NAME: &str = "Unknown";

/// One row of a roster card: normalised stat label and its value
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatLine {
    pub label: String,
    pub value: u32,
}

/// A captured creature as shown in the roster.
///
/// `index` is fixed when the entry is appended and is the only handle used
/// when asking the service for a battle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Creature {
    pub index: usize,
    pub name: String,
    pub sprite: Option<String>,
    pub stats: Vec<StatLine>,
    pub power: u32,
}

/// One side of the battle panel with every fallback already applied
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Combatant {
    pub sprite: String,
    pub name: String,
    pub power: u32,
}

impl Default for Combatant {
    fn default() -> Self {
        Self {
            sprite: FALLBACK_SPRITE.to_string(),
            name: UNKNOWN_NAME.to_string(),
            power: 0,
        }
    }
}

impl Combatant {
    pub fn power_label(&self) -> String {
        format!("Power: {}", self.power)
    }
}

/// Contents of the battle panel; the panel is hidden while this is `None`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BattleView {
    pub message: String,
    pub player: Combatant,
    pub opponent: Combatant,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum NoticeKind {
    #[default]
    Success,
    Error,
}

/// Short-lived banner message
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Notice {
    pub id: u64,
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Requests currently in flight, one flag per action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Pending {
    pub start: bool,
    pub catch: bool,
    pub battle: bool,
    pub sync: bool,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Session (visible in debug) ---
    /// Game Service base URL, shown in the header
    #[debug(section = "Session", label = "Server")]
    pub server: String,

    /// Active session id; `None` until the first successful start
    #[debug(section = "Session", label = "Id", debug_fmt)]
    pub session: Option<String>,

    /// Team size as last reported by the service
    #[debug(section = "Session", label = "Team size")]
    pub team_size: usize,

    #[debug(section = "Session", label = "Score")]
    pub score: i64,

    #[debug(section = "Session", label = "Game over")]
    pub game_over: bool,

    // --- Views ---
    /// Captured creatures, append-only
    #[debug(section = "Roster", label = "Entries", debug_fmt)]
    pub roster: Vec<Creature>,

    /// Battle panel contents (hidden while `None`)
    #[debug(section = "Battle", label = "Panel", debug_fmt)]
    pub battle: Option<BattleView>,

    #[debug(section = "UI", label = "Notice", debug_fmt)]
    pub notice: Option<Notice>,

    #[debug(section = "UI", label = "Pending", debug_fmt)]
    pub pending: Pending,

    #[debug(section = "UI", label = "Affordances", debug_fmt)]
    pub affordances: Affordances,

    // --- Internals (skipped) ---
    /// Cursor in the roster panel
    #[debug(skip)]
    pub selected: usize,

    /// Id handed to the next notice
    #[debug(skip)]
    pub next_notice_id: u64,
}

impl AppState {
    pub fn new(server: impl Into<String>) -> Self {
        let mut state = Self {
            server: server.into(),
            session: None,
            team_size: 0,
            score: 0,
            game_over: false,
            roster: Vec::new(),
            battle: None,
            notice: None,
            pending: Pending::default(),
            affordances: Affordances::default(),
            selected: 0,
            next_notice_id: 1,
        };
        state.refresh_affordances();
        state
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `session` is the one currently shown
    pub fn is_current(&self, session: &str) -> bool {
        self.session.as_deref() == Some(session)
    }

    /// Recompute every affordance from the current state
    pub fn refresh_affordances(&mut self) {
        self.affordances = Affordances::derive(
            self.has_session(),
            self.team_size,
            self.roster.len(),
            self.game_over,
            self.pending,
        );
    }

    pub fn selected_creature(&self) -> Option<&Creature> {
        self.roster.get(self.selected)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8000")
    }
}
