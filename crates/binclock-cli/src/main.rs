//! `binclock` - binary-coded-decimal clock for the terminal.
//!
//! Renders the current (or a supplied) time of day once, or refreshes it
//! every interval until Ctrl+C.
//!
//! # Architecture
//!
//! ```text
//! flags + YAML config --> Settings --> ClockStateBuilder --> DisplayRegistry --> stdout
//! ```
//!
//! Logs go to stderr so they never mix with clock output.

mod cli;
mod config;
mod error;
mod runner;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::{ClockConfig, LogFormat, LoggingConfig};
use crate::runner::{Console, Settings, run_loop, run_once};

/// Application entry point.
///
/// Help and version requests exit 0; every other failure is printed to
/// stderr and exits 1.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            // Nothing useful to report if the terminal itself is gone.
            let _ = err.print();
            return code;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => ClockConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClockConfig::default(),
    };
    init_tracing(&config.logging);

    let settings = Settings::resolve(&cli, &config);
    debug!(
        mode = %settings.mode,
        looping = settings.looping,
        fixed_time = settings.time.is_some(),
        config = ?cli.config,
        "settings resolved"
    );

    let builder = settings.builder();
    if settings.looping {
        let shutdown = tokio::signal::ctrl_c();
        run_loop(&builder, &settings, Console::new(io::stdout()), shutdown).await?;
    } else {
        run_once(&builder, settings.mode, io::stdout())?;
    }
    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` overrides `logging.level`.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);
    match logging.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
