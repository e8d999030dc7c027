//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `POST /game/start`
    StartSession,
    /// `POST /game/{session}/catch`
    Catch { session: String },
    /// `POST /game/{session}/battle/{index}`
    Battle { session: String, index: usize },
    /// `GET /game/{session}/team` followed by `GET /game/{session}/score`
    SyncTeam { session: String },
    /// Clear notice `id` once its display time is up
    ExpireNotice { id: u64 },
}
