use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::Commands;

const LOG_ENV: &str = "COURTCART_LOG";

#[derive(Parser)]
#[command(name = "courtcart")]
#[command(about = "Food court marketplace client", long_about = None)]
pub(crate) struct Cli {
    /// Append a JSONL session trace (TUI only)
    #[arg(long = "trace", value_name = "PATH")]
    trace: Option<PathBuf>,

    /// Write logs to this file (TUI only)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // The terminal belongs to the UI; logs go to a file or nowhere.
            if let Some(path) = cli.log_file.as_deref() {
                init_file_logging(path)?;
            }
            courtcart::tui::run_with_options(courtcart::tui::TuiRunOptions { trace: cli.trace })?;
        }
        Some(command) => {
            if cli.trace.is_some() || cli.log_file.is_some() {
                anyhow::bail!(
                    "`--trace` and `--log-file` are only supported when running the TUI (no subcommand)"
                );
            }
            init_stderr_logging();
            crate::cli_exec::handle_command(command)?
        }
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_file_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .try_init()
        .context("install log subscriber")?;
    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
