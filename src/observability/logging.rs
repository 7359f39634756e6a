//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via `RUST_LOG`, falling back to [`DEFAULT_FILTER`]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "argocd_renderer=info,tower_http=info";

/// Build the filter from `RUST_LOG`, or `default` when unset or invalid.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_logging(default: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
