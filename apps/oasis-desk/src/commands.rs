//! # Desk Commands
//!
//! One function per subcommand. Each takes already-parsed inputs, calls the
//! engine and returns a [`Report`] for `main` to print.
//!
//! ## Command Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  oasis-desk admit --cabin c.json --draft d.json                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  run() ── read JSON, load settings, pick today                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  admit() ← THIS MODULE ── oasis_core::validate_reservation              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Report { body, rejected } ── stdout JSON, exit 0 or 2                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use oasis_core::stats::{self, StaySummary};
use oasis_core::validation::validate_cabin;
use oasis_core::{
    compute_excluded_date_ranges, price_quote, validate_reservation, BookingStatus,
    CabinSnapshot, CoreError, ReservationDraft, Settings,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::DeskResult;

/// What a command printed, and whether it turned the request down.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub body: Value,
    pub rejected: bool,
}

impl Report {
    fn accepted(body: &impl Serialize) -> DeskResult<Self> {
        Ok(Report {
            body: serde_json::to_value(body)?,
            rejected: false,
        })
    }
}

/// Evaluates a booking draft.
pub fn admit(
    cabin: &CabinSnapshot,
    draft: &ReservationDraft,
    settings: &Settings,
    today: NaiveDate,
) -> DeskResult<Report> {
    let admission = validate_reservation(draft, cabin, settings, today)?;
    let rejected = !admission.is_admitted();
    if rejected {
        info!(cabin_id = cabin.id, "Booking draft rejected");
    } else {
        info!(cabin_id = cabin.id, "Booking draft admitted");
    }

    Ok(Report {
        body: serde_json::to_value(&admission)?,
        rejected,
    })
}

/// Prices a stay.
pub fn quote(
    cabin: &CabinSnapshot,
    start: NaiveDate,
    end: NaiveDate,
    guests: u32,
    breakfast: bool,
    settings: &Settings,
) -> DeskResult<Report> {
    let quote = price_quote(cabin, start, end, guests, breakfast, settings)?;
    Report::accepted(&quote)
}

/// Lists the dates the booking form must disable.
pub fn blocked(cabin: &CabinSnapshot) -> DeskResult<Report> {
    Report::accepted(&compute_excluded_date_ranges(cabin))
}

/// Computes the dashboard figures.
pub fn dashboard(
    stays: &[StaySummary],
    cabins: u32,
    days: u32,
    today: NaiveDate,
) -> DeskResult<Report> {
    Report::accepted(&stats::dashboard(stays, cabins, days, today))
}

/// Checks a cabin as the cabin editor would before saving.
pub fn check_cabin(cabin: &CabinSnapshot) -> DeskResult<Report> {
    match validate_cabin(cabin) {
        Ok(()) => Ok(Report {
            body: json!({ "valid": true }),
            rejected: false,
        }),
        Err(violations) => Ok(Report {
            body: json!({ "valid": false, "violations": violations }),
            rejected: true,
        }),
    }
}

/// Checks a status change on a stored booking.
pub fn transition(from: BookingStatus, to: BookingStatus, paid: bool) -> DeskResult<Report> {
    match from.validate_transition(to, paid) {
        Ok(()) => Ok(Report {
            body: json!({ "allowed": true, "from": from, "to": to }),
            rejected: false,
        }),
        Err(err @ CoreError::InvalidStatusTransition { .. }) => Ok(Report {
            body: json!({ "allowed": false, "from": from, "to": to, "reason": err.to_string() }),
            rejected: true,
        }),
        Err(err) => Err(err.into()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
