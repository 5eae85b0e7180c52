//! # oasis-desk Entry Point
//!
//! ## Exit Codes
//! - `0` - result printed
//! - `1` - the command failed (bad input, bad settings)
//! - `2` - result printed, request turned down (rejected draft, invalid
//!   cabin, forbidden status change)

use std::process::ExitCode;

use clap::Parser;
use oasis_desk::cli::Cli;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    oasis_desk::init_tracing();

    let report = match oasis_desk::run(&cli) {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report.body) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("error: failed to render output: {err}");
            return ExitCode::FAILURE;
        }
    }

    if report.rejected {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
