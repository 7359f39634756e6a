//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and the env parser handle syntax)
//! - Validate value ranges (timeout > 0, body limit > 0)
//! - Check bind address and upstream URL are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>
//! - An empty whitelist is legal; it simply denies every repository

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::Settings;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstream_url {url:?} is not an absolute URL: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("whitelist pattern #{0} is blank")]
    BlankPattern(usize),
}

/// Check a loaded configuration before it is accepted.
pub fn validate_config(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            settings.bind_address.clone(),
        ));
    }

    if !settings.upstream_url.is_empty() {
        if let Err(e) = url::Url::parse(&settings.upstream_url) {
            errors.push(ValidationError::InvalidUpstreamUrl {
                url: settings.upstream_url.clone(),
                reason: e.to_string(),
            });
        }
    }

    if settings.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if settings.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    for (i, pattern) in settings.whitelist_patterns.iter().enumerate() {
        if pattern.trim().is_empty() {
            errors.push(ValidationError::BlankPattern(i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&Settings::default()), Ok(()));
    }

    #[test]
    fn test_empty_whitelist_is_valid() {
        let settings = Settings {
            whitelist_patterns: Vec::new(),
            ..Settings::default()
        };
        assert!(validate_config(&settings).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let settings = Settings {
            bind_address: "not-an-address".into(),
            upstream_url: "relative/path".into(),
            request_timeout_secs: 0,
            max_body_bytes: 0,
            whitelist_patterns: vec!["https://github.com/*".into(), "  ".into()],
            ..Settings::default()
        };

        let errors = validate_config(&settings).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::ZeroBodyLimit));
        assert!(errors.contains(&ValidationError::BlankPattern(1)));
        assert!(matches!(
            errors[0],
            ValidationError::InvalidBindAddress(ref addr) if addr == "not-an-address"
        ));
    }

    #[test]
    fn test_absolute_upstream_url_is_valid() {
        let settings = Settings {
            upstream_url: "http://renderer.internal:9000".into(),
            ..Settings::default()
        };
        assert!(validate_config(&settings).is_ok());
    }
}
