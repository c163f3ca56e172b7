//! Responses the relay produces itself.
//!
//! # Responsibilities
//! - Static answers for `/`, `/index.html` and `/robots.txt`
//! - 404 for paths with no route
//! - Map forwarding failures to 5xx without leaking upstream detail
//!
//! Upstream responses, including upstream 4xx/5xx, never pass through here.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::upstream::UpstreamError;

pub const SERVICE_RUNNING: &str = "Service is running!";
pub const ROBOTS_TXT: &str = "User-agent: *\nDisallow: /";

/// Error raised while forwarding a routed request.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("resolved target {url:?} is not a valid URL")]
    InvalidTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::InvalidTarget { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Invalid upstream target").into_response()
            }
            RelayError::Upstream(UpstreamError::Timeout(_)) => {
                (StatusCode::GATEWAY_TIMEOUT, "Upstream request timed out").into_response()
            }
            RelayError::Upstream(UpstreamError::Unreachable(_)) => {
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        }
    }
}

pub fn service_running() -> Response {
    (StatusCode::OK, SERVICE_RUNNING).into_response()
}

pub fn robots() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        ROBOTS_TXT,
    )
        .into_response()
}

pub fn not_found(path: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("Not Found: {path}")).into_response()
}
