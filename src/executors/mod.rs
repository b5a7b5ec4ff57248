//! Shell executors.
//!
//! Lookups never spawn processes directly; they go through a
//! [`ShellExecutor`], so hosts and tests can substitute their own.

mod base;
mod shell;

pub use base::{ShellExecutor, ShellOutput};
pub use shell::SystemShell;
