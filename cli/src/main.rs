//! mediabind CLI - loads a stage and drives pause bindings through a scheduler.
//!
//! ```text
//! main() -> load_stage() -> init_tracing() -> build_document()
//!                                                  |
//!                                                  v
//!                        pause: pause_all() -> QueueScheduler::drain()
//!                        list:  render_states()
//! ```

mod app;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "mediabind", version, about = "Pause media elements on a stage by id")]
struct Cli {
    /// Stage file describing the host document. Defaults to ~/.mediabind/stage.toml.
    #[arg(long, global = true, value_name = "PATH")]
    stage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pause elements by id, in the order given.
    Pause {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },
    /// Show every element on the stage and its playback state.
    List,
}

fn init_tracing(stage_filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(stage_filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // stdout carries command output; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .with(env_filter)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let stage = app::load_stage(cli.stage.as_deref());
    init_tracing(stage.as_ref().ok().and_then(|s| s.log_filter()));
    let stage = stage.context("Failed to load stage")?;

    let document = app::build_document(&stage);
    tracing::debug!(elements = document.len(), "Stage loaded");

    match cli.command {
        Command::Pause { ids } => {
            let summary = app::pause_all(&document, &ids);
            for line in &summary.lines {
                println!("{line}");
            }
            for line in app::render_states(&document) {
                println!("{line}");
            }
            if summary.missing > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::List => {
            for line in app::render_states(&document) {
                println!("{line}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
