//! ArgoCD manifest renderer service.
//!
//! Serves `POST /render` behind a repository URL whitelist, plus
//! `GET /healthz` and `GET /whitelist`. Rendering is mock-only for now.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod security;

pub use config::Settings;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
