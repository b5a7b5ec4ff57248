use clap::Parser;
use pipe_once::cli::{Cli, Commands};
use pipe_once::types::config::Config;
use pipe_once::PipeOnceResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> PipeOnceResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let (config, load_error) = if cli.config.exists() {
        match Config::load(&cli.config) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        }
    } else {
        (Config::default(), None)
    };

    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("pipe_once={}", log_level)
            .parse()
            .unwrap_or_else(|_| "pipe_once=info".parse().expect("fallback directive is valid")),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    match load_error {
        Some(e) => tracing::warn!(
            "Ignoring configuration at {} ({}), using defaults",
            cli.config.display(),
            e
        ),
        None => tracing::debug!("Configuration loaded from: {}", cli.config.display()),
    }

    match cli.command {
        Commands::Run {
            terms,
            cwd,
            json,
            repeat,
        } => {
            pipe_once::cli::commands::run(terms, cwd, json, repeat, &config).await?;
        }
        Commands::Init { path } => {
            pipe_once::cli::commands::init(path).await?;
        }
        Commands::Version => {
            pipe_once::cli::commands::version();
        }
    }

    Ok(())
}
