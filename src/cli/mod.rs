//! Command line interface for pipe-once.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::config::CONFIG_FILE_NAME;

/// pipe-once - run shell commands once, reuse their output.
#[derive(Parser, Debug)]
#[command(name = "pipe-once")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Verbose mode.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs shell commands through the memoizing lookup.
    Run {
        /// Commands to run, one term each.
        #[arg(required = true)]
        terms: Vec<String>,

        /// Working directory (overrides `shell.basedir`).
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Print results as a JSON array.
        #[arg(long)]
        json: bool,

        /// Resolve the same terms this many times against one cache.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        repeat: u32,
    },

    /// Writes a default configuration file.
    Init {
        /// Target directory (default: current directory).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Shows version.
    Version,
}
