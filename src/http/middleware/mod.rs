pub mod whitelist;

pub use whitelist::{classify, whitelist_middleware, Verdict};
