//! Configuration schema definitions.
//!
//! All fields have defaults so an empty environment yields a working
//! mock-mode service that only accepts GitHub repositories.

use serde::{Deserialize, Serialize};

/// Environment variable prefix shared by every setting.
pub const ENV_PREFIX: &str = "ARGOCD_RENDERER_";

/// Default pattern: any repository hosted on github.com.
pub const DEFAULT_WHITELIST_PATTERN: &str = "https://github.com/*";

/// Root configuration for the renderer service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Glob patterns a `repoURL` must match, checked in order.
    pub whitelist_patterns: Vec<String>,

    /// Synthesize a fixed manifest instead of rendering.
    pub mock_mode: bool,

    /// Upstream renderer URL. Empty when unset.
    pub upstream_url: String,

    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Largest request body the whitelist gate will buffer.
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            whitelist_patterns: vec![DEFAULT_WHITELIST_PATTERN.to_string()],
            mock_mode: true,
            upstream_url: String::new(),
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 1024 * 1024,
        }
    }
}
