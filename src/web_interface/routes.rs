use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use log::{debug, warn};
use warp::filters::path::FullPath;
use warp::http::{HeaderMap, Method};
use warp::reply::Response;
use warp::{reply, Filter, Rejection, Reply};

use crate::controller::dispatcher::Dispatcher;
use crate::protocol::response_mapper::map_outcome;
use crate::protocol::types::{
    self, BadRequestReason, Outcome, Request, RequestHeaders, ACCEPT_HEADER, API_KEY_HEADER,
    CONTENT_TYPE_HEADER, ENDPOINT_PATH,
};

/// Largest request body the gate will buffer. A form carrying a token and an action is
/// a few dozen bytes.
pub const MAX_BODY_BYTES: u64 = 4 * 1024;

/// The complete HTTP surface: every method on every path lands here.
///
/// Routing and method checks are done by hand rather than with `warp::path` /
/// `warp::post` so that each failure maps onto the fixed JSON table instead of warp's
/// default rejection replies.
pub fn gate_routes(
    dispatcher: Arc<Dispatcher>,
) -> impl Filter<Extract = (Response,), Error = Infallible> + Clone {
    warp::method()
        .and(warp::path::full())
        .and(warp::header::headers_cloned())
        .and(form_body())
        .map(move |method: Method, path: FullPath, headers: HeaderMap, body: Bytes| {
            let outcome = route(&dispatcher, &method, path.as_str(), &headers, &body);
            into_response(&outcome)
        })
        .recover(handle_rejection)
        .unify()
}

// Bodies announcing more than MAX_BODY_BYTES are refused before being read. A request
// without Content-Length is read as empty.
fn form_body() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    let bounded = warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::bytes());
    let unannounced = warp::header::optional::<u64>("content-length").and_then(
        |length: Option<u64>| async move {
            match length {
                None => Ok(Bytes::new()),
                Some(_) => Err(warp::reject::not_found()),
            }
        },
    );
    bounded.or(unannounced).unify()
}

/// POST /endpoint
fn route(
    dispatcher: &Dispatcher,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    body: &[u8],
) -> Outcome {
    if path != ENDPOINT_PATH {
        debug!("{} {} -> no such route", method, path);
        return Outcome::Rejected(types::Rejection::NotFound);
    }

    let request_headers = extract_headers(headers);
    if request_headers.is_empty() {
        debug!("{} {} carries none of the expected headers", method, path);
    }

    let request = Request::with_form_body(method.as_str(), request_headers, body);
    dispatcher.handle(&request)
}

fn extract_headers(headers: &HeaderMap) -> RequestHeaders {
    let value = |name: &str| {
        headers
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
    };

    RequestHeaders {
        content_type: value(CONTENT_TYPE_HEADER),
        accept: value(ACCEPT_HEADER),
        api_key: value(API_KEY_HEADER),
    }
}

fn into_response(outcome: &Outcome) -> Response {
    let (status, body) = map_outcome(outcome);
    reply::with_status(reply::json(&body), status).into_response()
}

/// Anything warp itself refuses (an oversized or unreadable body) still gets a JSON reply
/// from the fixed table.
async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let outcome = if err.is_not_found() {
        Outcome::Rejected(types::Rejection::NotFound)
    } else {
        warn!("Request refused before reaching the gate: {:?}", err);
        Outcome::Rejected(types::Rejection::BadRequest(BadRequestReason::UnreadableBody))
    };
    Ok(into_response(&outcome))
}
