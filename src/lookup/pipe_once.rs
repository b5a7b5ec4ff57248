//! Shell command lookup that runs each distinct command only once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use super::LookupPlugin;
use crate::cache::CommandCache;
use crate::executors::{ShellExecutor, SystemShell};
use crate::types::config::Config;
use crate::types::requests::LookupTerms;
use crate::{PipeOnceError, PipeOnceResult};

/// Memoizing shell lookup.
///
/// Each term is a shell command. The first successful run of a command
/// stores its stdout (trailing whitespace removed) in the shared
/// [`CommandCache`]; every later lookup of the exact same text returns the
/// stored value without spawning anything.
pub struct PipeOnceLookup {
    basedir: Option<PathBuf>,
    cache: Arc<CommandCache>,
    executor: Arc<dyn ShellExecutor>,
}

impl PipeOnceLookup {
    /// Creates a lookup over an existing cache and executor.
    pub fn new(
        basedir: Option<PathBuf>,
        cache: Arc<CommandCache>,
        executor: Arc<dyn ShellExecutor>,
    ) -> Self {
        Self {
            basedir,
            cache,
            executor,
        }
    }

    /// Creates a lookup using the `[shell]` settings of `config`.
    pub fn from_config(config: &Config, cache: Arc<CommandCache>) -> Self {
        Self::new(
            config.shell.basedir.clone(),
            cache,
            Arc::new(SystemShell::from_config(&config.shell)),
        )
    }

    /// Runs commands in `basedir` instead of the configured directory.
    #[must_use]
    pub fn with_basedir(mut self, basedir: impl Into<PathBuf>) -> Self {
        self.basedir = Some(basedir.into());
        self
    }

    /// Working directory commands run in, if any.
    pub fn basedir(&self) -> Option<&Path> {
        self.basedir.as_deref()
    }

    /// Cache backing this lookup.
    pub fn cache(&self) -> &Arc<CommandCache> {
        &self.cache
    }

    /// Resolves `terms` in order.
    ///
    /// Commands run one at a time. The first command that exits non-zero
    /// aborts the call with [`PipeOnceError::ExecutionFailed`]; terms after it
    /// are not run and nothing is cached for the failed command.
    pub async fn run(&self, terms: impl Into<LookupTerms>) -> PipeOnceResult<Vec<String>> {
        let terms = terms.into();
        let mut results = Vec::with_capacity(terms.len());

        for term in &terms {
            results.push(self.resolve(term).await?);
        }

        Ok(results)
    }

    async fn resolve(&self, term: &str) -> PipeOnceResult<String> {
        if let Some(cached) = self.cache.get(term) {
            tracing::debug!(command = %term, "pipe lookup cache hit");
            return Ok(cached);
        }

        tracing::debug!(
            command = %term,
            executor = self.executor.name(),
            cwd = ?self.basedir,
            "pipe lookup running command"
        );
        let output = self.executor.run(term, self.basedir.as_deref()).await?;

        if !output.success() {
            tracing::warn!(command = %term, exit_code = output.exit_code, "pipe lookup failed");
            return Err(PipeOnceError::execution_failed(term, output.exit_code));
        }

        let value = output.stdout.trim_end();
        Ok(self.cache.insert(term, value))
    }
}

#[async_trait]
impl LookupPlugin for PipeOnceLookup {
    fn name(&self) -> &str {
        "pipe_once"
    }

    async fn run(&self, terms: LookupTerms) -> PipeOnceResult<Vec<String>> {
        PipeOnceLookup::run(self, terms).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executors::ShellOutput;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Executor answering from a fixed table and recording every command it runs.
    #[derive(Default)]
    struct ScriptedExecutor {
        outputs: HashMap<String, ShellOutput>,
        calls: Mutex<Vec<(String, Option<PathBuf>)>>,
    }

    impl ScriptedExecutor {
        fn with(mut self, command: &str, exit_code: i32, stdout: &str) -> Self {
            self.outputs.insert(
                command.to_string(),
                ShellOutput {
                    exit_code,
                    stdout: stdout.to_string(),
                },
            );
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
        }
    }

    #[async_trait]
    impl ShellExecutor for ScriptedExecutor {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn run(&self, command: &str, cwd: Option<&Path>) -> PipeOnceResult<ShellOutput> {
            self.calls
                .lock()
                .unwrap()
                .push((command.to_string(), cwd.map(Path::to_path_buf)));
            Ok(self.outputs.get(command).cloned().unwrap_or(ShellOutput {
                exit_code: 127,
                stdout: String::new(),
            }))
        }
    }

    fn lookup(executor: &Arc<ScriptedExecutor>) -> PipeOnceLookup {
        let executor: Arc<dyn ShellExecutor> = executor.clone();
        PipeOnceLookup::new(None, Arc::new(CommandCache::new()), executor)
    }

    #[tokio::test]
    async fn test_runs_each_command_once() {
        let executor = Arc::new(ScriptedExecutor::default().with("date", 0, "today\n"));
        let lookup = lookup(&executor);

        assert_eq!(lookup.run("date").await.unwrap(), vec!["today"]);
        assert_eq!(lookup.run("date").await.unwrap(), vec!["today"]);
        assert_eq!(executor.calls(), vec!["date"]);
    }

    #[tokio::test]
    async fn test_trims_trailing_whitespace_only() {
        let executor = Arc::new(ScriptedExecutor::default().with("banner", 0, "  abc \t\n\n"));
        let lookup = lookup(&executor);

        assert_eq!(lookup.run("banner").await.unwrap(), vec!["  abc"]);
    }

    #[tokio::test]
    async fn test_results_follow_input_order() {
        let executor = Arc::new(
            ScriptedExecutor::default()
                .with("echo a", 0, "a\n")
                .with("echo b", 0, "b\n"),
        );
        let lookup = lookup(&executor);

        assert_eq!(lookup.run(["echo b", "echo a"]).await.unwrap(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_repeated_term_in_one_call_runs_once() {
        let executor = Arc::new(ScriptedExecutor::default().with("echo a", 0, "a\n"));
        let lookup = lookup(&executor);

        let results = lookup.run(["echo a", "echo a"]).await.unwrap();
        assert_eq!(results, vec!["a", "a"]);
        assert_eq!(executor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_terms() {
        let executor = Arc::new(
            ScriptedExecutor::default()
                .with("echo a", 0, "a\n")
                .with("exit 3", 3, "")
                .with("echo c", 0, "c\n"),
        );
        let lookup = lookup(&executor);

        let err = lookup.run(["echo a", "exit 3", "echo c"]).await.unwrap_err();
        match err {
            PipeOnceError::ExecutionFailed { command, exit_code } => {
                assert_eq!(command, "exit 3");
                assert_eq!(exit_code, 3);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(executor.calls(), vec!["echo a", "exit 3"]);
        assert!(lookup.cache().contains("echo a"));
        assert!(!lookup.cache().contains("exit 3"));
    }

    #[tokio::test]
    async fn test_failure_is_retried_on_next_call() {
        let executor = Arc::new(ScriptedExecutor::default().with("exit 3", 3, ""));
        let lookup = lookup(&executor);

        assert!(lookup.run("exit 3").await.is_err());
        assert!(lookup.run("exit 3").await.is_err());
        assert_eq!(executor.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_output_is_cached() {
        let executor = Arc::new(ScriptedExecutor::default().with("true", 0, ""));
        let lookup = lookup(&executor);

        assert_eq!(lookup.run("true").await.unwrap(), vec![""]);
        assert_eq!(lookup.run("true").await.unwrap(), vec![""]);
        assert_eq!(executor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_no_terms_returns_empty() {
        let executor = Arc::new(ScriptedExecutor::default());
        let lookup = lookup(&executor);

        assert!(lookup.run(Vec::<String>::new()).await.unwrap().is_empty());
        assert!(executor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_basedir_is_passed_to_executor() {
        let executor = Arc::new(ScriptedExecutor::default().with("pwd", 0, "/srv\n"));
        let lookup = lookup(&executor).with_basedir("/srv");
        assert_eq!(lookup.basedir(), Some(Path::new("/srv")));

        lookup.run("pwd").await.unwrap();
        let calls = executor.calls.lock().unwrap();
        assert_eq!(calls[0].1.as_deref(), Some(Path::new("/srv")));
    }

    #[test]
    fn test_basedir_from_config() {
        let mut config = Config::default();
        assert!(PipeOnceLookup::from_config(&config, Arc::new(CommandCache::new()))
            .basedir()
            .is_none());

        config.shell.basedir = Some(PathBuf::from("/opt/site"));
        let lookup = PipeOnceLookup::from_config(&config, Arc::new(CommandCache::new()));
        assert_eq!(lookup.basedir(), Some(Path::new("/opt/site")));
    }

    #[tokio::test]
    async fn test_lookups_share_cache() {
        let executor = Arc::new(ScriptedExecutor::default().with("hostname", 0, "box\n"));
        let shared: Arc<dyn ShellExecutor> = executor.clone();
        let cache = Arc::new(CommandCache::new());

        let first = PipeOnceLookup::new(None, Arc::clone(&cache), Arc::clone(&shared));
        let second = PipeOnceLookup::new(None, Arc::clone(&cache), shared);

        first.run("hostname").await.unwrap();
        assert_eq!(second.run("hostname").await.unwrap(), vec!["box"]);
        assert_eq!(executor.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_plugin_trait() {
        let executor = Arc::new(ScriptedExecutor::default().with("echo hi", 0, "hi\n"));
        let plugin: Box<dyn LookupPlugin> = Box::new(lookup(&executor));

        assert_eq!(plugin.name(), "pipe_once");
        assert_eq!(
            plugin.run(LookupTerms::from("echo hi")).await.unwrap(),
            vec!["hi"]
        );
    }
}
