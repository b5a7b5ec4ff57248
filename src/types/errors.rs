//! Error types for pipe-once.

use std::time::Duration;

use thiserror::Error;

/// Standard result type for pipe-once.
pub type PipeOnceResult<T> = Result<T, PipeOnceError>;

/// Errors raised by lookups, configuration and the CLI.
#[derive(Error, Debug)]
pub enum PipeOnceError {
    /// A command exited with a non-zero status (or was killed by a signal,
    /// reported as `-1`).
    #[error("pipe lookup ({command}) returned {exit_code}")]
    ExecutionFailed { command: String, exit_code: i32 },

    #[error("pipe lookup ({command}) timed out after {timeout:?}")]
    ExecutionTimeout { command: String, timeout: Duration },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipeOnceError {
    /// Creates a failed-execution error.
    pub fn execution_failed<S: Into<String>>(command: S, exit_code: i32) -> Self {
        Self::ExecutionFailed {
            command: command.into(),
            exit_code,
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Exit code carried by an `ExecutionFailed` error.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExecutionFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}
