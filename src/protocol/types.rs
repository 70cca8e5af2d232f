use std::fmt;

/// Path of the single resource served by the gate.
pub const ENDPOINT_PATH: &str = "/endpoint";

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const ACCEPT_HEADER: &str = "Accept";
pub const API_KEY_HEADER: &str = "X-Api-Key";

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const APPLICATION_JSON: &str = "application/json";

pub const TOKEN_FIELD: &str = "token";
pub const ACTION_FIELD: &str = "action";

/// Requested operation, decoded from the `action` form field.
///
/// Matching is case-sensitive: `login` is not `LOGIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Login,
    Logout,
    Action,
}

impl Action {
    pub fn parse(raw: &str) -> Option<Action> {
        match raw {
            "LOGIN" => Some(Action::Login),
            "LOGOUT" => Some(Action::Logout),
            "ACTION" => Some(Action::Action),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Login => "LOGIN",
            Action::Logout => "LOGOUT",
            Action::Action => "ACTION",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three headers the gate cares about. Anything else on the wire is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub api_key: Option<String>,
}

impl RequestHeaders {
    /// Headers a well-behaved client sends with the given API key.
    pub fn standard(api_key: impl Into<String>) -> Self {
        Self {
            content_type: Some(FORM_URLENCODED.to_string()),
            accept: Some(APPLICATION_JSON.to_string()),
            api_key: Some(api_key.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content_type.is_none() && self.accept.is_none() && self.api_key.is_none()
    }
}

/// One inbound call, already routed to the endpoint.
///
/// `token` and `action` stay raw strings here; they only become typed values once the
/// request shape validator has accepted them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub headers: RequestHeaders,
    pub token: Option<String>,
    pub action: Option<String>,
}

impl Request {
    pub fn post(headers: RequestHeaders, token: Option<&str>, action: Option<&str>) -> Self {
        Self {
            method: "POST".to_string(),
            headers,
            token: token.map(str::to_string),
            action: action.map(str::to_string),
        }
    }

    /// Decodes the `token` and `action` fields from an urlencoded form body.
    ///
    /// The first occurrence of a repeated field wins and unknown fields are ignored.
    pub fn with_form_body(method: impl Into<String>, headers: RequestHeaders, body: &[u8]) -> Self {
        let mut token = None;
        let mut action = None;
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                TOKEN_FIELD if token.is_none() => token = Some(value.into_owned()),
                ACTION_FIELD if action.is_none() => action = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            method: method.into(),
            headers,
            token,
            action,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadRequestReason {
    MissingContentType,
    UnsupportedContentType,
    UnacceptableAccept,
    MissingToken,
    MissingAction,
    UnknownAction,
    UnreadableBody,
}

impl fmt::Display for BadRequestReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadRequestReason::MissingContentType => write!(f, "Content-Type header is missing or empty"),
            BadRequestReason::UnsupportedContentType => write!(f, "Content-Type is not form-urlencoded"),
            BadRequestReason::UnacceptableAccept => write!(f, "Accept header does not admit JSON"),
            BadRequestReason::MissingToken => write!(f, "token field is missing or empty"),
            BadRequestReason::MissingAction => write!(f, "action field is missing or empty"),
            BadRequestReason::UnknownAction => write!(f, "action is not one of LOGIN, LOGOUT, ACTION"),
            BadRequestReason::UnreadableBody => write!(f, "request body could not be read"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    MissingApiKey,
    InvalidApiKey,
    InvalidToken,
    SessionAlreadyActive,
    NoActiveSession,
}

impl fmt::Display for UnauthorizedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnauthorizedReason::MissingApiKey => write!(f, "X-Api-Key header is missing or empty"),
            UnauthorizedReason::InvalidApiKey => write!(f, "X-Api-Key does not match"),
            UnauthorizedReason::InvalidToken => write!(f, "token does not match"),
            UnauthorizedReason::SessionAlreadyActive => write!(f, "a session is already active"),
            UnauthorizedReason::NoActiveSession => write!(f, "no active session"),
        }
    }
}

/// Every way a request can be turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotFound,
    MethodNotAllowed,
    BadRequest(BadRequestReason),
    Unauthorized(UnauthorizedReason),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NotFound => write!(f, "Not Found"),
            Rejection::MethodNotAllowed => write!(f, "Method Not Allowed"),
            Rejection::BadRequest(reason) => write!(f, "Bad Request ({})", reason),
            Rejection::Unauthorized(reason) => write!(f, "Unauthorized ({})", reason),
        }
    }
}

/// The pipeline's decision for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl From<Result<(), Rejection>> for Outcome {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(rejection) => Outcome::Rejected(rejection),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "OK"),
            Outcome::Rejected(rejection) => write!(f, "{}", rejection),
        }
    }
}
