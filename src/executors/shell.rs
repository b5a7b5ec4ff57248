//! Executor backed by the system shell.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::base::{ShellExecutor, ShellOutput};
use crate::types::config::ShellConfig;
use crate::{PipeOnceError, PipeOnceResult};

/// Runs commands as `<program> <args...> <command>`, `sh -c` by default.
#[derive(Debug, Clone)]
pub struct SystemShell {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl SystemShell {
    /// Creates an executor using the platform default shell and no timeout.
    pub fn new() -> Self {
        Self::from_config(&ShellConfig::default())
    }

    /// Creates an executor from the `[shell]` configuration section.
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            timeout: config.timeout(),
        }
    }

    /// Kills commands that run longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn command(&self, command: &str, cwd: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShellExecutor for SystemShell {
    fn name(&self) -> &str {
        &self.program
    }

    async fn run(&self, command: &str, cwd: Option<&Path>) -> PipeOnceResult<ShellOutput> {
        let child = self.command(command, cwd).spawn()?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| PipeOnceError::ExecutionTimeout {
                    command: command.to_string(),
                    timeout: limit,
                })??,
            None => child.wait_with_output().await?,
        };

        Ok(ShellOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
