//! Implementation of the pipe-once CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::CommandCache;
use crate::lookup::PipeOnceLookup;
use crate::types::config::{Config, CONFIG_FILE_NAME};
use crate::PipeOnceResult;

/// Resolves `terms` and prints the results.
///
/// With `repeat > 1` the same terms are resolved again against the same
/// cache; only the first pass spawns processes.
pub async fn run(
    terms: Vec<String>,
    cwd: Option<PathBuf>,
    json: bool,
    repeat: u32,
    config: &Config,
) -> PipeOnceResult<()> {
    let cache = Arc::new(CommandCache::new());
    let mut lookup = PipeOnceLookup::from_config(config, Arc::clone(&cache));
    if let Some(dir) = cwd {
        lookup = lookup.with_basedir(dir);
    }

    let mut results = Vec::new();
    for _ in 0..repeat {
        results = lookup.run(terms.clone()).await?;
    }

    let stats = cache.stats();
    tracing::debug!(
        cached = stats.size,
        hits = stats.hits,
        misses = stats.misses,
        hit_rate = stats.hit_rate(),
        "pipe lookup cache summary"
    );

    println!("{}", render(&results, json)?);
    Ok(())
}

fn render(results: &[String], json: bool) -> PipeOnceResult<String> {
    if json {
        Ok(serde_json::to_string(results)?)
    } else {
        Ok(results.join("\n"))
    }
}

/// Writes a default configuration file to `path` (or the current directory).
pub async fn init(path: Option<PathBuf>) -> PipeOnceResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    Config::default().save(&config_path)?;

    println!("Configuration created at: {}", config_path.display());
    Ok(())
}

/// Shows version.
pub fn version() {
    println!("pipe-once {}", env!("CARGO_PKG_VERSION"));
}
