//! Configuration validation.
//!
//! Serde handles syntax; this module checks the things serde cannot: route
//! prefixes are single path segments, base URLs are absolute http(s) origins
//! that can be concatenated with a request suffix, and numeric settings are
//! usable. Every problem is reported, not just the first.

use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("route prefix {0:?} must start with '/' and name exactly one path segment")]
    InvalidPrefix(String),

    #[error("route {prefix:?}: base URL {url:?} is not an absolute http(s) URL")]
    InvalidBaseUrl { prefix: String, url: String },

    #[error("route {prefix:?}: base URL {url:?} must not end with '/' or carry a query or fragment")]
    BaseUrlSuffix { prefix: String, url: String },

    #[error("header deny list contains an empty entry")]
    EmptyDenyEntry,

    #[error("upstream.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (prefix, base) in &config.routes.0 {
        if !is_single_segment(prefix) {
            errors.push(ValidationError::InvalidPrefix(prefix.clone()));
        }

        match Url::parse(base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
                if base.ends_with('/') || url.query().is_some() || url.fragment().is_some() {
                    errors.push(ValidationError::BaseUrlSuffix {
                        prefix: prefix.clone(),
                        url: base.clone(),
                    });
                }
            }
            _ => errors.push(ValidationError::InvalidBaseUrl {
                prefix: prefix.clone(),
                url: base.clone(),
            }),
        }
    }

    if config.headers.deny.iter().any(|entry| entry.trim().is_empty()) {
        errors.push(ValidationError::EmptyDenyEntry);
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("request_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_single_segment(prefix: &str) -> bool {
    match prefix.strip_prefix('/') {
        Some(name) => !name.is_empty() && !name.contains(['/', '?', '#']),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RoutesConfig;

    fn with_routes(routes: &[(&str, &str)]) -> RelayConfig {
        RelayConfig {
            routes: RoutesConfig(
                routes
                    .iter()
                    .map(|(p, u)| (p.to_string(), u.to_string()))
                    .collect(),
            ),
            ..RelayConfig::default()
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn test_rejects_malformed_prefixes() {
        let config = with_routes(&[
            ("openai", "https://api.openai.com"),
            ("/", "https://api.openai.com"),
            ("/a/b", "https://api.openai.com"),
            ("/q?x", "https://api.openai.com"),
        ]);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::InvalidPrefix(_))));
    }

    #[test]
    fn test_rejects_bad_base_urls() {
        let config = with_routes(&[
            ("/rel", "api.openai.com"),
            ("/ftp", "ftp://files.example.com"),
            ("/slash", "https://api.openai.com/"),
            ("/query", "https://api.openai.com/v1?key=1"),
        ]);

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidBaseUrl {
            prefix: "/rel".into(),
            url: "api.openai.com".into(),
        }));
        assert!(errors.contains(&ValidationError::InvalidBaseUrl {
            prefix: "/ftp".into(),
            url: "ftp://files.example.com".into(),
        }));
        assert!(errors.contains(&ValidationError::BaseUrlSuffix {
            prefix: "/slash".into(),
            url: "https://api.openai.com/".into(),
        }));
        assert!(errors.contains(&ValidationError::BaseUrlSuffix {
            prefix: "/query".into(),
            url: "https://api.openai.com/v1?key=1".into(),
        }));
    }

    #[test]
    fn test_plain_http_upstream_is_accepted() {
        let config = with_routes(&[("/local", "http://127.0.0.1:8080/api")]);
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = with_routes(&[("bad", "nope")]);
        config.headers.deny.push(" ".into());
        config.upstream.connect_timeout_secs = 0;
        config.upstream.request_timeout_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
    }
}
