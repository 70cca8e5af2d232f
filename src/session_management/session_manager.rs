use crate::protocol::types::{Action, Rejection};
use crate::session_management::session::Session;
use crate::session_management::SessionState;
use log::{debug, info};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The process-wide session slot.
///
/// Created once at startup in the `LoggedOut` state and shared by reference with the
/// dispatcher. Every transition reads and replaces the session under one lock, so
/// transitions take effect in lock-acquisition order.
#[derive(Debug, Default)]
pub struct SessionManager {
    slot: Mutex<Session>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Session::LoggedOut),
        }
    }

    /// Applies `action` to the current session.
    ///
    /// On rejection the stored session is left exactly as it was.
    pub fn transition(&self, action: Action, token: &str) -> Result<(), Rejection> {
        let mut slot = self.lock();
        let next = slot.next(action, token)?;

        match (&*slot, &next) {
            (Session::LoggedOut, Session::LoggedIn(active)) => {
                info!("Session {} opened", active.id);
            }
            (Session::LoggedIn(active), Session::LoggedOut) => {
                info!(
                    "Session {} closed after {}s and {} action(s)",
                    active.id,
                    active.age().num_seconds(),
                    active.actions_performed
                );
            }
            (_, Session::LoggedIn(active)) => {
                debug!("Session {} performed action #{}", active.id, active.actions_performed);
            }
            _ => {}
        }

        *slot = next;
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.lock().state()
    }

    /// Copy of the current session, taken under the lock.
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    // The session is only ever replaced whole, so a poisoned lock still holds a
    // consistent value.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
