use serde::Serialize;
use warp::http::StatusCode;

use super::types::{Outcome, Rejection};

/// JSON payload written back for every request.
///
/// Serializes to either `{"result":"OK"}` or `{"error":"<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ApiBody {
    Result { result: String },
    Error { error: String },
}

impl ApiBody {
    pub fn ok() -> Self {
        ApiBody::Result {
            result: "OK".to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiBody::Error {
            error: message.into(),
        }
    }
}

/// Maps a pipeline outcome onto its fixed status code and body.
///
/// Rejection reasons are deliberately dropped: the wire only ever carries the canonical
/// reason phrase of the status.
pub fn map_outcome(outcome: &Outcome) -> (StatusCode, ApiBody) {
    match outcome {
        Outcome::Success => (StatusCode::OK, ApiBody::ok()),
        Outcome::Rejected(rejection) => map_rejection(rejection),
    }
}

pub fn map_rejection(rejection: &Rejection) -> (StatusCode, ApiBody) {
    let (status, phrase) = match rejection {
        Rejection::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
        Rejection::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
        Rejection::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
        Rejection::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
    };
    (status, ApiBody::error(phrase))
}
