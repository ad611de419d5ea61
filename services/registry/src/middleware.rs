//! Request interceptors: request logging and the access gate
//!
//! Layer order, outermost first: [`log_requests`], [`require_authenticated_flag`],
//! then body extraction and validation inside the handlers.

use axum::{
    extract::{Query, Request},
    http::{HeaderName, HeaderValue, Uri},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::error::ApiError;

/// Response header carrying the per-request id
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Query parameter the access gate looks for
pub const AUTH_QUERY_PARAM: &str = "authenticated";

/// Path segment under which every request is gated
pub const GATED_ROOT: &str = "users";

/// Log each request and its response status under a request-scoped span
pub async fn log_requests(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("request", %request_id);

    async move {
        info!("Request: {} {}", req.method(), req.uri().path());

        let mut response = next.run(req).await;
        info!("Response: {}", response.status().as_u16());

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

/// Reject requests under `/users` that do not carry `authenticated=true`
///
/// This is a placeholder gate with no credential behind it. It runs for
/// every path below the root, matched or not.
pub async fn require_authenticated_flag(req: Request, next: Next) -> Result<Response, ApiError> {
    if is_gated_path(req.uri().path()) && !has_authenticated_flag(req.uri()) {
        warn!("Rejected {} {}: missing authenticated flag", req.method(), req.uri().path());
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}

/// `/users` itself or anything below it; the segment compares without case
fn is_gated_path(path: &str) -> bool {
    let mut segments = path.trim_start_matches('/').splitn(2, '/');
    segments
        .next()
        .is_some_and(|first| first.eq_ignore_ascii_case(GATED_ROOT))
}

/// Every value given for the flag, joined with `,`, must be exactly `true`
///
/// A repeated flag therefore never passes, whatever its values. Keys compare
/// without case, values are percent-decoded first.
fn has_authenticated_flag(uri: &Uri) -> bool {
    let Ok(Query(params)) = Query::<Vec<(String, String)>>::try_from_uri(uri) else {
        return false;
    };

    let values: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case(AUTH_QUERY_PARAM))
        .map(|(_, value)| value.as_str())
        .collect();

    values.join(",") == "true"
}
