//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! ARGOCD_RENDERER_CONFIG (optional TOML file)
//!     → loader.rs (parse & deserialize)
//! ARGOCD_RENDERER_* environment variables
//!     → loader.rs (override individual fields)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → shared via Arc with the HTTP server
//! ```
//!
//! # Design Decisions
//! - Settings are built once in `main` and passed explicitly; no global
//! - All fields have defaults to allow an empty environment
//! - Validation separates syntactic (parsing) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, ConfigError};
pub use schema::Settings;
pub use validation::ValidationError;
