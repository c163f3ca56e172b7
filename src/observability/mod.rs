//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → per-request spans from tower_http::TraceLayer (request_id, method, path)
//!
//! logging.rs installs the subscriber: pretty for terminals, JSON lines for
//! log aggregation.
//! ```

pub mod logging;

pub use logging::init_logging;
