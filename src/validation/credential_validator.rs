use log::warn;

use super::secrets::constant_time_eq_str;
use crate::configuration::types::ProvisionedCredentials;
use crate::protocol::types::{
    BadRequestReason, Rejection, RequestHeaders, UnauthorizedReason, APPLICATION_JSON, FORM_URLENCODED,
};

/// Transport-level admissibility: method, API key and content headers.
///
/// Checks run in a fixed order and the first failure wins:
/// method, `X-Api-Key`, `Content-Type`, then `Accept`. A wrong key therefore yields
/// `Unauthorized` even when the content headers are wrong too.
pub fn check_credentials(
    method: &str,
    headers: &RequestHeaders,
    credentials: &ProvisionedCredentials,
) -> Result<(), Rejection> {
    if method != "POST" {
        return Err(Rejection::MethodNotAllowed);
    }

    check_api_key(headers.api_key.as_deref(), &credentials.api_key)?;
    check_content_type(headers.content_type.as_deref())?;
    check_accept(headers.accept.as_deref())
}

fn check_api_key(value: Option<&str>, provisioned: &str) -> Result<(), Rejection> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            warn!("Rejecting request without X-Api-Key");
            return Err(Rejection::Unauthorized(UnauthorizedReason::MissingApiKey));
        }
    };

    if constant_time_eq_str(value, provisioned) {
        Ok(())
    } else {
        warn!("Rejecting request with mismatched X-Api-Key");
        Err(Rejection::Unauthorized(UnauthorizedReason::InvalidApiKey))
    }
}

fn check_content_type(value: Option<&str>) -> Result<(), Rejection> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Err(Rejection::BadRequest(BadRequestReason::MissingContentType)),
    };

    if media_type(value).eq_ignore_ascii_case(FORM_URLENCODED) {
        Ok(())
    } else {
        Err(Rejection::BadRequest(BadRequestReason::UnsupportedContentType))
    }
}

// Accept is required and must name application/json; wildcards do not count.
fn check_accept(value: Option<&str>) -> Result<(), Rejection> {
    let admits_json = value
        .map(|v| v.split(',').map(media_type).any(|entry| entry.eq_ignore_ascii_case(APPLICATION_JSON)))
        .unwrap_or(false);

    if admits_json {
        Ok(())
    } else {
        Err(Rejection::BadRequest(BadRequestReason::UnacceptableAccept))
    }
}

/// Strips parameters (`; charset=...`) and surrounding whitespace from a media type.
fn media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or("").trim()
}
