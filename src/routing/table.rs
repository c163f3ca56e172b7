//! Immutable prefix to base URL table.

use std::collections::HashMap;

use crate::config::RoutesConfig;

/// Route table compiled from configuration.
///
/// Keys are single path segments including their leading `/` (`/openai`).
/// Values are absolute base URLs without a trailing slash.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: HashMap<String, String>,
}

impl RouteTable {
    /// Build a table from `(prefix, base_url)` pairs.
    pub fn new<I, P, U>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(prefix, base)| (prefix.into(), base.into()))
                .collect(),
        }
    }

    /// Build a table from the validated `[routes]` section.
    pub fn from_config(routes: &RoutesConfig) -> Self {
        Self::new(routes.0.iter().map(|(p, u)| (p.as_str(), u.as_str())))
    }

    /// Exact lookup of a prefix.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    /// Iterate entries sorted by prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(p, u)| (p.as_str(), u.as_str()))
            .collect();
        entries.sort_unstable();
        entries.into_iter()
    }
}
