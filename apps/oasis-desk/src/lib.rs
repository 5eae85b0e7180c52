//! # oasis-desk: Front-Desk Tool for The Wild Oasis
//!
//! Reads snapshots from JSON files, runs them through `oasis-core` and prints
//! the result as JSON.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        oasis-desk                                       │
//! │                                                                         │
//! │  main.rs ─────► Sets up logging, parses arguments, sets exit code      │
//! │                                                                         │
//! │  lib.rs ──────► run(): reads inputs, picks today, dispatches           │
//! │                                                                         │
//! │  cli.rs ──────► clap arguments and subcommands                         │
//! │                                                                         │
//! │  config.rs ───► Settings: env > settings.toml > defaults               │
//! │                                                                         │
//! │  commands.rs ─► admit, quote, blocked, stats, check-cabin, transition  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         oasis-core                               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::Report;
use error::{DeskError, DeskResult};

/// Runs one subcommand.
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Resolve today ── --today or the local calendar date                 │
/// │  2. Load settings ── only for commands that evaluate bookings           │
/// │  3. Read JSON inputs                                                    │
/// │  4. Call the command, return its Report                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: &Cli) -> DeskResult<Report> {
    let today = cli.today.unwrap_or_else(local_today);
    debug!(%today, "Running desk command");

    match &cli.command {
        Command::Admit { cabin, draft } => {
            let settings = config::load(cli.settings.as_deref())?;
            commands::admit(&read_json(cabin)?, &read_json(draft)?, &settings, today)
        }
        Command::Quote {
            cabin,
            start,
            end,
            guests,
            breakfast,
        } => {
            let settings = config::load(cli.settings.as_deref())?;
            commands::quote(&read_json(cabin)?, *start, *end, *guests, *breakfast, &settings)
        }
        Command::Blocked { cabin } => commands::blocked(&read_json(cabin)?),
        Command::Stats {
            stays,
            cabins,
            days,
        } => {
            let stays: Vec<oasis_core::stats::StaySummary> = read_json(stays)?;
            commands::dashboard(&stays, *cabins, *days, today)
        }
        Command::CheckCabin { cabin } => commands::check_cabin(&read_json(cabin)?),
        Command::Transition { from, to, paid } => commands::transition(*from, *to, *paid),
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every evaluation
/// - `RUST_LOG=oasis_core=trace` - Engine detail only
/// - Default: `info,oasis=debug`
///
/// Logs are written to stderr; stdout carries the JSON result.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,oasis=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> DeskResult<T> {
    debug!(?path, "Reading input");
    let contents = std::fs::read_to_string(path).map_err(|source| DeskError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| DeskError::Json {
        path: path.to_path_buf(),
        source,
    })
}
