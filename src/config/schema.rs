//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Prefix to base URL table. Replaces the built-in table when present.
    pub routes: RoutesConfig,

    /// Outbound header filtering.
    pub headers: HeaderFilterConfig,

    /// Outbound client settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,

    /// TCP port to bind.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Prefix (`/name`) to upstream base URL mapping.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RoutesConfig(pub BTreeMap<String, String>);

impl Default for RoutesConfig {
    fn default() -> Self {
        let table = [
            ("/discord", "https://discord.com/api"),
            ("/telegram", "https://api.telegram.org"),
            ("/openai", "https://api.openai.com"),
            ("/claude", "https://api.anthropic.com"),
            ("/gemini", "https://generativelanguage.googleapis.com"),
            ("/meta", "https://www.meta.ai/api"),
            ("/groq", "https://api.groq.com/openai"),
            ("/xai", "https://api.x.ai"),
            ("/cohere", "https://api.cohere.ai"),
            ("/huggingface", "https://api-inference.huggingface.co"),
            ("/together", "https://api.together.xyz"),
            ("/novita", "https://api.novita.ai"),
            ("/portkey", "https://api.portkey.ai"),
            ("/fireworks", "https://api.fireworks.ai"),
            ("/openrouter", "https://openrouter.ai/api"),
            ("/cerebras", "https://api.cerebras.ai"),
        ];

        Self(
            table
                .into_iter()
                .map(|(prefix, base)| (prefix.to_string(), base.to_string()))
                .collect(),
        )
    }
}

/// Header filtering applied to the outbound leg.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderFilterConfig {
    /// Substrings; any header whose lowercased name contains one is dropped.
    pub deny: Vec<String>,
}

impl Default for HeaderFilterConfig {
    fn default() -> Self {
        Self {
            deny: ["host", "referer", "cf-", "forward", "cdn"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total time allowed for one upstream exchange, body included.
    /// Unset by default so long streaming completions are not cut off.
    pub request_timeout_secs: Option<u64>,

    /// Idle keep-alive connections retained per upstream host.
    pub pool_max_idle_per_host: usize,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            pool_max_idle_per_host: 16,
            use_system_proxy: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
