//! # pipe-once
//!
//! Shell command lookup for template hosts: every distinct command string
//! runs once, and its trimmed stdout is memoized for the rest of the
//! process.
//!
//! ## Modules
//!
//! - [`lookup`] - The `pipe_once` lookup plugin
//! - [`executors`] - Shell process execution
//! - [`cache`] - Command output cache
//! - [`types`] - Configuration, errors and lookup input
//! - [`cli`] - Command line interface

pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod executors;
pub mod lookup;
pub mod types;

pub use cache::CommandCache;
pub use lookup::{LookupPlugin, PipeOnceLookup};
pub use types::config::Config;
pub use types::errors::{PipeOnceError, PipeOnceResult};
pub use types::requests::LookupTerms;
