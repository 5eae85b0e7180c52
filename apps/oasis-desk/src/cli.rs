//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use oasis_core::stay::parse_date;
use oasis_core::BookingStatus;

/// Wild Oasis front desk: admit bookings, quote stays, read the dashboard.
///
/// Results are printed to stdout as JSON. Logs go to stderr (`RUST_LOG`).
#[derive(Debug, Parser)]
#[command(name = "oasis-desk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Hotel settings file (TOML, `[booking]` table)
    #[arg(short, long, global = true, env = "OASIS_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Date to treat as today (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, global = true, value_parser = parse_day)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a booking draft. Exits with 2 when it is rejected.
    Admit {
        /// Cabin snapshot (JSON)
        #[arg(long)]
        cabin: PathBuf,

        /// Booking form contents (JSON)
        #[arg(long)]
        draft: PathBuf,
    },

    /// Price a stay
    Quote {
        /// Cabin snapshot (JSON)
        #[arg(long)]
        cabin: PathBuf,

        /// Arrival day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_day)]
        start: NaiveDate,

        /// Departure day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_day)]
        end: NaiveDate,

        /// Number of guests
        #[arg(long)]
        guests: u32,

        /// Include breakfast
        #[arg(long, default_value_t = false)]
        breakfast: bool,
    },

    /// List the date ranges already taken in a cabin
    Blocked {
        /// Cabin snapshot (JSON)
        #[arg(long)]
        cabin: PathBuf,
    },

    /// Dashboard figures for a period
    Stats {
        /// Bookings of the period (JSON array)
        #[arg(long)]
        stays: PathBuf,

        /// Number of cabins in the hotel
        #[arg(long)]
        cabins: u32,

        /// Length of the period in days
        #[arg(long, default_value_t = 30)]
        days: u32,
    },

    /// Check a cabin before saving it. Exits with 2 when it is invalid.
    CheckCabin {
        /// Cabin (JSON)
        #[arg(long)]
        cabin: PathBuf,
    },

    /// Check a booking status change. Exits with 2 when it is not allowed.
    Transition {
        /// Current status (unconfirmed, checked-in, checked-out)
        #[arg(long)]
        from: BookingStatus,

        /// Requested status
        #[arg(long)]
        to: BookingStatus,

        /// The booking has been paid
        #[arg(long, default_value_t = false)]
        paid: bool,
    },
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    parse_date("date", value).map_err(|err| err.to_string())
}
