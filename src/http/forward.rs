//! Request forwarding.
//!
//! # Responsibilities
//! - Filter inbound headers for the outbound leg
//! - Hand method, URL, headers and body to the upstream adapter
//! - Return the upstream response untouched, or a [`RelayError`]
//!
//! One attempt per request; the first failure is final.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use url::Url;

use crate::http::response::RelayError;
use crate::http::upstream::{OutboundRequest, Upstream};
use crate::routing::ResolvedTarget;
use crate::security::{strip_hop_by_hop, HeaderDenyList};

/// Forwards routed requests to their upstream.
#[derive(Clone)]
pub struct Forwarder {
    upstream: Arc<dyn Upstream>,
    deny: Arc<HeaderDenyList>,
}

impl Forwarder {
    pub fn new(upstream: Arc<dyn Upstream>, deny: Arc<HeaderDenyList>) -> Self {
        Self { upstream, deny }
    }

    pub async fn forward(
        &self,
        request: Request<Body>,
        target: &ResolvedTarget,
    ) -> Result<Response<Body>, RelayError> {
        let url = Url::parse(&target.url).map_err(|source| RelayError::InvalidTarget {
            url: target.url.clone(),
            source,
        })?;

        let (parts, body) = request.into_parts();
        let mut headers = self.deny.filter(&parts.headers);
        strip_hop_by_hop(&mut headers);

        tracing::debug!(
            method = %parts.method,
            prefix = %target.prefix,
            upstream_host = url.host_str().unwrap_or_default(),
            forwarded_headers = headers.len(),
            "Forwarding request"
        );

        let response = self
            .upstream
            .send(OutboundRequest {
                method: parts.method,
                url,
                headers,
                body,
            })
            .await?;

        tracing::debug!(status = %response.status(), "Upstream responded");
        Ok(response)
    }
}
