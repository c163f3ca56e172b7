//! HTTP server setup and the single entry handler.
//!
//! # Responsibilities
//! - Create the Axum Router with one catch-all handler
//! - Wire up request tracing with a per-request ID
//! - Answer the static paths (`/`, `/index.html`, `/robots.txt`)
//! - Dispatch everything else to the routing engine, then the forwarder
//! - Serve until the shutdown signal fires

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::http::forward::Forwarder;
use crate::http::response;
use crate::http::upstream::{HttpUpstream, Upstream};
use crate::routing::{RouteTable, Router as RelayRouter};
use crate::security::HeaderDenyList;

/// Error building the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RelayRouter>,
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a server that forwards through a pooled `reqwest` client.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let upstream = HttpUpstream::new(&config.upstream)?;
        Ok(Self::with_upstream(config, Arc::new(upstream)))
    }

    /// Create a server around any [`Upstream`] implementation.
    pub fn with_upstream(config: RelayConfig, upstream: Arc<dyn Upstream>) -> Self {
        let table = RouteTable::from_config(&config.routes);
        let deny = Arc::new(HeaderDenyList::from_config(&config.headers));

        let state = AppState {
            router: Arc::new(RelayRouter::new(table)),
            forwarder: Arc::new(Forwarder::new(upstream, deny)),
        };

        Self {
            router: build_router(state),
            config,
        }
    }

    /// The fully layered Axum router, for embedding or `oneshot` testing.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.0.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/{*path}", any(relay_handler))
        .route("/", any(relay_handler))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                // Query strings often carry provider keys; log the path only.
                tracing::info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

/// Entry point for every inbound request.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    match path.as_str() {
        "/" | "/index.html" => return response::service_running(),
        "/robots.txt" => return response::robots(),
        _ => {}
    }

    let Some(target) = state.router.resolve(&path) else {
        tracing::warn!(path = %request.uri().path(), "No route matched");
        return response::not_found(&path);
    };

    match state.forwarder.forward(request, &target).await {
        Ok(upstream) => upstream.into_response(),
        Err(e) => {
            tracing::error!(prefix = %target.prefix, error = %e, "Upstream error");
            e.into_response()
        }
    }
}
