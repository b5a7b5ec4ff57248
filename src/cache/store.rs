//! Thread-safe command output cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

/// Output stored for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedOutput {
    /// Trimmed standard output.
    pub output: String,

    /// Moment the command finished and its output was stored.
    pub cached_at: DateTime<Utc>,
}

impl CachedOutput {
    /// Wraps an output, stamping it with the current time.
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            cached_at: Utc::now(),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cached commands.
    pub size: usize,

    /// Lookups answered from the cache.
    pub hits: u64,

    /// Lookups that had to run the command.
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Command text → trimmed output.
///
/// Entries are written once and never replaced or removed. Share one cache
/// between lookups with `Arc<CommandCache>`.
#[derive(Debug, Default)]
pub struct CommandCache {
    entries: Mutex<HashMap<String, CachedOutput>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CommandCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry, so
    // a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CachedOutput>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the cached output for `command`, recording a hit or a miss.
    pub fn get(&self, command: &str) -> Option<String> {
        let found = self.lock().get(command).map(|c| c.output.clone());
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Stores `output` for `command` unless a value is already present.
    ///
    /// Returns the value that ends up cached, which is the earlier one when
    /// two callers race on the same command.
    pub fn insert(&self, command: impl Into<String>, output: impl Into<String>) -> String {
        self.lock()
            .entry(command.into())
            .or_insert_with(|| CachedOutput::new(output))
            .output
            .clone()
    }

    /// Checks for an entry without touching the statistics.
    pub fn contains(&self, command: &str) -> bool {
        self.lock().contains_key(command)
    }

    /// Number of cached commands.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of every entry, sorted by command text.
    pub fn entries(&self) -> Vec<(String, CachedOutput)> {
        let mut entries: Vec<_> = self
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
