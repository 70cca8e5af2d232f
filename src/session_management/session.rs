use super::active_session::ActiveSession;
use super::SessionState;
use crate::protocol::types::{Action, Rejection, UnauthorizedReason};

/// The single session slot.
///
/// `LoggedIn` always carries a token that already passed shape validation, so an active
/// session can never hold a malformed token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(ActiveSession),
}

impl Session {
    pub fn state(&self) -> SessionState {
        match self {
            Session::LoggedOut => SessionState::LoggedOut,
            Session::LoggedIn(_) => SessionState::LoggedIn,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn(active) => Some(active.token.as_str()),
        }
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn(active) => Some(active),
        }
    }

    /// Computes the session that follows `action`, leaving `self` untouched.
    ///
    /// | state     | action | result                 |
    /// |-----------|--------|------------------------|
    /// | LoggedOut | LOGIN  | LoggedIn               |
    /// | LoggedIn  | LOGIN  | SessionAlreadyActive   |
    /// | LoggedIn  | ACTION | LoggedIn (count + 1)   |
    /// | LoggedOut | ACTION | NoActiveSession        |
    /// | LoggedIn  | LOGOUT | LoggedOut              |
    /// | LoggedOut | LOGOUT | NoActiveSession        |
    pub fn next(&self, action: Action, token: &str) -> Result<Session, Rejection> {
        match (self, action) {
            (Session::LoggedOut, Action::Login) => Ok(Session::LoggedIn(ActiveSession::open(token))),
            (Session::LoggedIn(_), Action::Login) => {
                Err(Rejection::Unauthorized(UnauthorizedReason::SessionAlreadyActive))
            }
            (Session::LoggedIn(active), Action::Action) => {
                let mut active = active.clone();
                active.actions_performed += 1;
                Ok(Session::LoggedIn(active))
            }
            (Session::LoggedIn(_), Action::Logout) => Ok(Session::LoggedOut),
            (Session::LoggedOut, Action::Action) | (Session::LoggedOut, Action::Logout) => {
                Err(Rejection::Unauthorized(UnauthorizedReason::NoActiveSession))
            }
        }
    }
}
