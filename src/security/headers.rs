//! Outbound header filtering.
//!
//! # Responsibilities
//! - Drop headers that leak the caller's origin or the relay's own edge
//!   (host, referer, CDN and forwarding metadata)
//! - Strip hop-by-hop headers on both legs
//!
//! # Design Decisions
//! - Deny entries are substrings, not names: `x-forwarded-for` is dropped
//!   because it contains `forward`, `x-cdn-loop` because it contains `cdn`
//! - Matching is case-insensitive; entries are lowercased once at startup

use axum::http::header::{HeaderMap, CONNECTION};

use crate::config::HeaderFilterConfig;

/// Connection-level headers owned by each hop's HTTP stack.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Immutable set of lowercase header-name substrings to reject.
#[derive(Debug, Clone)]
pub struct HeaderDenyList {
    entries: Vec<String>,
}

impl HeaderDenyList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &HeaderFilterConfig) -> Self {
        Self::new(&config.deny)
    }

    /// Returns false if the lowercased name contains any deny entry.
    pub fn is_allowed(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        !self.entries.iter().any(|denied| name.contains(denied.as_str()))
    }

    /// Copy every value of every allowed header.
    pub fn filter(&self, headers: &HeaderMap) -> HeaderMap {
        let mut allowed = HeaderMap::with_capacity(headers.keys_len());
        for (name, value) in headers {
            if self.is_allowed(name.as_str()) {
                allowed.append(name.clone(), value.clone());
            }
        }
        allowed
    }
}

impl Default for HeaderDenyList {
    fn default() -> Self {
        Self::from_config(&HeaderFilterConfig::default())
    }
}

/// Remove hop-by-hop headers, including any listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<String> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    for name in HOP_BY_HOP.iter().copied().chain(listed.iter().map(String::as_str)) {
        headers.remove(name);
    }
}
