//! Route lookup.
//!
//! # Responsibilities
//! - Split the first path segment off a request path
//! - Look the segment up in the route table (exact, case-sensitive)
//! - Rebuild the upstream URL from the base URL and the untouched remainder
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via HashMap; no prefix scanning, so `/openaiextra`
//!   never matches `/openai`
//! - Explicit NoMatch (`None`) rather than a silent default

use std::fmt;

use crate::routing::table::RouteTable;

/// Upstream target computed for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Matched table key, e.g. `/openai`.
    pub prefix: String,
    /// Absolute upstream URL, path and query included.
    pub url: String,
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Prefix router over a static [`RouteTable`].
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve a request path (query string included) to an upstream URL.
    pub fn resolve(&self, path: &str) -> Option<ResolvedTarget> {
        let (prefix, rest) = split_prefix(path);
        let base = self.table.get(prefix)?;

        Some(ResolvedTarget {
            prefix: prefix.to_string(),
            url: format!("{base}{rest}"),
        })
    }
}

/// Split `path` at the first `/` after the leading character.
///
/// Only `/` ends the segment: a query directly after the prefix stays part of
/// it, so `/openai?x=1` never names the `/openai` route. The remainder keeps
/// its delimiter, so `prefix + rest == path` always holds.
pub fn split_prefix(path: &str) -> (&str, &str) {
    let split_index = path
        .get(1..)
        .and_then(|rest| rest.find('/'))
        .map_or(path.len(), |i| i + 1);

    path.split_at(split_index)
}
