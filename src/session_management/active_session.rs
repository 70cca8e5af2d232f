use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Bookkeeping for the session opened by a successful `LOGIN`.
///
/// Only used for logging and inspection; none of it influences whether a request is
/// accepted. Serializes without the token, for diagnostics.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSession {
    /// Fresh identifier minted on every login.
    pub id: Uuid,
    /// Token the session was opened with.
    #[serde(skip)]
    pub token: String,
    /// When the `LOGIN` was accepted.
    pub started_at: DateTime<Utc>,
    /// Number of `ACTION` requests accepted during this session.
    pub actions_performed: u64,
}

impl ActiveSession {
    pub fn open(token: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            token: token.to_string(),
            started_at: Utc::now(),
            actions_performed: 0,
        }
    }

    pub fn age(&self) -> Duration {
        Utc::now() - self.started_at
    }
}

impl std::fmt::Debug for ActiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSession")
            .field("id", &self.id)
            .field("started_at", &self.started_at)
            .field("actions_performed", &self.actions_performed)
            .finish_non_exhaustive()
    }
}
