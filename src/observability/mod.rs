//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → tower-http TraceLayer spans per request, tagged with x-request-id
//! Consumer:
//!     → logging.rs subscriber (stdout, filtered by RUST_LOG)
//! ```

pub mod logging;

pub use logging::{init_logging, DEFAULT_FILTER};
