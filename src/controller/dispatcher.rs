use std::sync::Arc;

use log::debug;

use crate::configuration::types::ProvisionedCredentials;
use crate::protocol::types::{Outcome, Rejection, Request};
use crate::session_management::session_manager::SessionManager;
use crate::validation::{check_credentials, check_shape};

/// Runs a request through the whole pipeline and resolves it to an [`Outcome`].
///
/// Order: credential validator, request shape validator, session state machine. The
/// first rejection short-circuits, and only the state machine ever touches the session,
/// so a request rejected by a validator leaves no trace.
pub struct Dispatcher {
    credentials: ProvisionedCredentials,
    sessions: Arc<SessionManager>,
}

impl Dispatcher {
    pub fn new(credentials: ProvisionedCredentials, sessions: Arc<SessionManager>) -> Self {
        Self { credentials, sessions }
    }

    pub fn handle(&self, request: &Request) -> Outcome {
        let outcome = Outcome::from(self.run_pipeline(request));
        debug!(
            "{} action={:?} -> {}",
            request.method,
            request.action.as_deref().unwrap_or(""),
            outcome
        );
        outcome
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    fn run_pipeline(&self, request: &Request) -> Result<(), Rejection> {
        check_credentials(&request.method, &request.headers, &self.credentials)?;
        let shape = check_shape(request.token.as_deref(), request.action.as_deref(), &self.credentials)?;
        self.sessions.transition(shape.action, shape.token)
    }
}
