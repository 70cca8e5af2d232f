//! Session management core module.
//!
//! The gate holds at most one session at a time. This module provides the session value
//! and its transition function ([`session`]), the data carried while a caller is logged
//! in ([`active_session`]) and the lock-guarded slot every request goes through
//! ([`session_manager`]).

use serde::Serialize;

/// Submodule for the data carried by a live session.
pub mod active_session;
/// Submodule for the session value and its transition rules.
pub mod session;
/// Submodule for the process-wide session slot.
pub mod session_manager;

/// Coarse state of the session slot.
///
/// Variants:
/// - `LoggedOut`: no caller is authenticated. Initial state.
/// - `LoggedIn`: a `LOGIN` succeeded and no `LOGOUT` followed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}
