//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Settings.whitelist_patterns
//!     → whitelist.rs (Whitelist, glob matcher)
//!     → http/middleware/whitelist.rs (request gate on POST /render)
//! ```

pub mod whitelist;

pub use whitelist::{glob_match, Whitelist};
