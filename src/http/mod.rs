//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → middleware/whitelist.rs (POST /render only: buffer body, check repoURL)
//!     → handlers.rs (healthz, render, whitelist)
//!     → error.rs (JSON error bodies)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer, HEALTH_PATH, RENDER_PATH, WHITELIST_PATH};
