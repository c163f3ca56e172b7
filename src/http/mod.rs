//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing span, static paths)
//!     → [routing decides the upstream URL]
//!     → forward.rs (filter headers, build outbound request)
//!     → upstream.rs (reqwest client, streaming both ways)
//!     → response.rs (relay-generated answers and 5xx mapping)
//!     → Send to client
//! ```

pub mod forward;
pub mod response;
pub mod server;
pub mod upstream;

pub use forward::Forwarder;
pub use response::RelayError;
pub use server::{AppState, HttpServer, ServerError};
pub use upstream::{HttpUpstream, OutboundRequest, Upstream, UpstreamError};
