//! Base trait for shell executors.

use std::path::Path;

use async_trait::async_trait;

use crate::PipeOnceResult;

/// What a finished command left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput {
    /// Exit code, or `-1` when the process was terminated by a signal.
    pub exit_code: i32,

    /// Captured standard output.
    pub stdout: String,
}

impl ShellOutput {
    /// True when the command exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs one command string through a shell.
///
/// Implementations run the command to completion with no stdin and return
/// its exit code and stdout. A non-zero exit is *not* an error at this
/// layer; only failing to start or wait on the process is.
#[async_trait]
pub trait ShellExecutor: Send + Sync {
    /// Executor name, used in logs.
    fn name(&self) -> &str;

    /// Runs `command`, optionally inside `cwd`.
    async fn run(&self, command: &str, cwd: Option<&Path>) -> PipeOnceResult<ShellOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockExecutor;

    #[async_trait]
    impl ShellExecutor for MockExecutor {
        fn name(&self) -> &str {
            "mock"
        }

        async fn run(&self, command: &str, _cwd: Option<&Path>) -> PipeOnceResult<ShellOutput> {
            Ok(ShellOutput {
                exit_code: 0,
                stdout: format!("{command}\n"),
            })
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let executor: Box<dyn ShellExecutor> = Box::new(MockExecutor);
        let output = executor.run("hello", None).await.unwrap();

        assert_eq!(executor.name(), "mock");
        assert!(output.success());
        assert_eq!(output.stdout, "hello\n");
    }

    #[test]
    fn test_success_only_for_zero() {
        let failed = ShellOutput {
            exit_code: 3,
            stdout: String::new(),
        };
        let killed = ShellOutput {
            exit_code: -1,
            stdout: String::new(),
        };
        assert!(!failed.success());
        assert!(!killed.success());
    }
}
