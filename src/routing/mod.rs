//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path + query ("/openai/v1/models?x=1")
//!     → router.rs (split first segment, exact table lookup)
//!     → Return: ResolvedTarget ("https://api.openai.com/v1/models?x=1") or NoMatch
//!
//! Table Compilation (at startup):
//!     [routes] config
//!     → table.rs (RouteTable)
//!     → Freeze inside an immutable Router
//! ```
//!
//! # Design Decisions
//! - Table built at startup, immutable at runtime
//! - Exact single-segment lookup only
//! - Deterministic: same input always yields the same target

pub mod router;
pub mod table;

pub use router::{split_prefix, ResolvedTarget, Router};
pub use table::RouteTable;
