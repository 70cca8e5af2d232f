use log::warn;

use super::secrets::constant_time_eq_str;
use crate::configuration::types::ProvisionedCredentials;
use crate::protocol::types::{Action, BadRequestReason, Rejection, UnauthorizedReason};

/// A request body that passed every shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellFormed<'a> {
    pub token: &'a str,
    pub action: Action,
}

/// Body well-formedness: presence of both fields, then token match, then action match.
///
/// Emptiness checks come before correctness checks, so an empty token with an unknown
/// action is a `BadRequest`, while a wrong token with an unknown action is `Unauthorized`.
pub fn check_shape<'a>(
    token: Option<&'a str>,
    action: Option<&'a str>,
    credentials: &ProvisionedCredentials,
) -> Result<WellFormed<'a>, Rejection> {
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(Rejection::BadRequest(BadRequestReason::MissingToken)),
    };
    let action = match action {
        Some(a) if !a.is_empty() => a,
        _ => return Err(Rejection::BadRequest(BadRequestReason::MissingAction)),
    };

    if !constant_time_eq_str(token, &credentials.token) {
        warn!("Rejecting token of length {} that does not match the provisioned one", token.len());
        return Err(Rejection::Unauthorized(UnauthorizedReason::InvalidToken));
    }

    let action = Action::parse(action).ok_or(Rejection::BadRequest(BadRequestReason::UnknownAction))?;

    Ok(WellFormed { token, action })
}
