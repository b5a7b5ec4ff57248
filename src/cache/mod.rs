//! Memoized command output.
//!
//! Outputs are keyed by the exact command text and live for as long as the
//! cache handle does. There is no eviction: once a command has produced a
//! value, that value is returned for every later lookup of the same text.

mod store;

pub use store::{CacheStats, CachedOutput, CommandCache};
