//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers
//!     → headers.rs (deny-substring filter, hop-by-hop strip)
//!     → Outbound request headers
//! ```

pub mod headers;

pub use headers::{strip_hop_by_hop, HeaderDenyList};
