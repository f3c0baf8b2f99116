use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use ntt_core::AccountId;

use crate::app::errors;
use crate::context::{CallerContext, RequestId};

/// Header carrying the caller's account on admin routes.
pub const ACCOUNT_HEADER: HeaderName = HeaderName::from_static("x-account");

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Tag every request with a fresh id and run it inside a span carrying it.
pub async fn request_id_middleware(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let request_id = RequestId::new();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let mut response = next.run(req).await;
        tracing::info!(status = response.status().as_u16(), "request completed");

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

/// Resolve the caller from `x-account`.
///
/// Missing header is a 401; a header that is not an address is a 400.
pub async fn caller_middleware(mut req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let account = match extract_account(req.headers()) {
        Ok(account) => account,
        Err(resp) => return resp,
    };

    req.extensions_mut().insert(CallerContext::new(account));
    next.run(req).await
}

fn extract_account(headers: &HeaderMap) -> Result<AccountId, Response> {
    let header = headers.get(ACCOUNT_HEADER).ok_or_else(|| {
        errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "x-account header is required")
    })?;

    let header = header.to_str().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_address", "x-account is not valid text")
    })?;

    header.trim().parse::<AccountId>().map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_address", e.to_string())
    })
}
