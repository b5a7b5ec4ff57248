//! Configuration for pipe-once.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::PipeOnceResult;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "pipe-once.toml";

/// Main configuration for pipe-once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Shell execution settings.
    #[serde(default)]
    pub shell: ShellConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// How terms are handed to the operating system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Shell program.
    #[serde(default = "default_shell_program")]
    pub program: String,

    /// Arguments placed before the command text.
    #[serde(default = "default_shell_args")]
    pub args: Vec<String>,

    /// Per-command timeout in seconds. Unset means wait forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Working directory for commands. Unset means the process directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basedir: Option<PathBuf>,
}

impl ShellConfig {
    /// Timeout as a `Duration`, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: default_shell_program(),
            args: default_shell_args(),
            timeout_secs: None,
            basedir: None,
        }
    }
}

#[cfg(windows)]
fn default_shell_program() -> String {
    "cmd".to_string()
}

#[cfg(not(windows))]
fn default_shell_program() -> String {
    "sh".to_string()
}

#[cfg(windows)]
fn default_shell_args() -> Vec<String> {
    vec!["/C".to_string()]
}

#[cfg(not(windows))]
fn default_shell_args() -> Vec<String> {
    vec!["-c".to_string()]
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> PipeOnceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PipeOnceResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Rejects settings that can never run a command.
    pub fn validate(&self) -> PipeOnceResult<()> {
        if self.shell.program.trim().is_empty() {
            return Err(crate::PipeOnceError::config("shell.program must not be empty"));
        }
        if self.shell.timeout_secs == Some(0) {
            return Err(crate::PipeOnceError::config(
                "shell.timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }
}
