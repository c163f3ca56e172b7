//! Outbound HTTP adapter.
//!
//! # Responsibilities
//! - Define the seam the forwarder talks to ([`Upstream`])
//! - Implement it with a pooled `reqwest` client ([`HttpUpstream`])
//! - Stream bodies in both directions without buffering
//!
//! # Design Decisions
//! - Redirects are never followed; a 3xx is the upstream's answer
//! - No response decompression; bytes are relayed as received
//! - Connect failures and timeouts are distinct errors

use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, HttpBody};
use axum::http::{HeaderMap, Method, Response};
use bytes::Bytes;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use url::Url;

use crate::config::UpstreamConfig;
use crate::security::strip_hop_by_hop;

/// Chunks buffered between the inbound body and the outbound request.
const BODY_CHANNEL_CAPACITY: usize = 16;

/// A request ready to leave the relay.
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Body,
}

/// Failure to obtain a response from the upstream.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request timed out")]
    Timeout(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("upstream unreachable: {0}")]
    Unreachable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Issues one outbound request and streams the response back.
#[async_trait]
pub trait Upstream: Send + Sync + 'static {
    async fn send(&self, request: OutboundRequest) -> Result<Response<Body>, UpstreamError>;
}

/// [`Upstream`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    /// Build the pooled client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .redirect(reqwest::redirect::Policy::none());

        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn send(&self, request: OutboundRequest) -> Result<Response<Body>, UpstreamError> {
        let OutboundRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, url).headers(headers);
        if !body.is_end_stream() {
            builder = builder.body(stream_body(body));
        }

        let upstream = builder.send().await.map_err(classify)?;

        let status = upstream.status();
        let mut headers = upstream.headers().clone();
        strip_hop_by_hop(&mut headers);

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

/// Pump the inbound body into the outbound request through a bounded channel.
///
/// The pump ends when the inbound body is exhausted or when the outbound
/// request is dropped.
fn stream_body(body: Body) -> reqwest::Body {
    let (tx, rx) = mpsc::channel::<Result<Bytes, axum::Error>>(BODY_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let mut chunks = body.into_data_stream();
        while let Some(chunk) = chunks.next().await {
            if tx.send(chunk).await.is_err() {
                break;
            }
        }
    });

    reqwest::Body::wrap_stream(ReceiverStream::new(rx))
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout(Box::new(err))
    } else {
        UpstreamError::Unreachable(Box::new(err))
    }
}
