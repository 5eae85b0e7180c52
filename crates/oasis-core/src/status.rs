//! # Booking Status
//!
//! Lifecycle of a booking and the guards on each transition.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Booking Lifecycle                                │
//! │                                                                         │
//! │   (new) ──admit──────────────────► UNCONFIRMED                          │
//! │     │                                   │                               │
//! │     │ admit + checking in               │ check-in                      │
//! │     │ [paid, starts today]              │ [paid]                        │
//! │     ▼                                   ▼                               │
//! │  CHECKED-IN ◄───────────────────────────┘                               │
//! │     │                                                                   │
//! │     │ checkout                                                          │
//! │     ▼                                                                   │
//! │  CHECKED-OUT                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine only performs the two `(new)` transitions, as part of
//! admission. Check-in and checkout of stored bookings are carried out by the
//! booking service; it calls [`BookingStatus::validate_transition`] so the
//! same guards apply there.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, Field, ViolationReason, Violations};
use crate::types::ReservationDraft;

/// Where a booking is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    /// Booked, guest has not arrived.
    #[default]
    Unconfirmed,
    /// Guest is in the cabin.
    CheckedIn,
    /// Guest has left. The cabin is free again.
    CheckedOut,
}

impl BookingStatus {
    /// Returns the wire name of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Unconfirmed => "unconfirmed",
            BookingStatus::CheckedIn => "checked-in",
            BookingStatus::CheckedOut => "checked-out",
        }
    }

    /// Status given to a booking at creation time.
    ///
    /// ```rust
    /// use oasis_core::BookingStatus;
    ///
    /// assert_eq!(BookingStatus::initial(true), BookingStatus::CheckedIn);
    /// assert_eq!(BookingStatus::initial(false), BookingStatus::Unconfirmed);
    /// ```
    pub const fn initial(is_checking_in_now: bool) -> Self {
        if is_checking_in_now {
            BookingStatus::CheckedIn
        } else {
            BookingStatus::Unconfirmed
        }
    }

    /// The front desk offers "Check in" only for unconfirmed bookings.
    pub const fn can_check_in(&self) -> bool {
        matches!(self, BookingStatus::Unconfirmed)
    }

    /// The front desk offers "Check out" only for checked-in bookings.
    pub const fn can_check_out(&self) -> bool {
        matches!(self, BookingStatus::CheckedIn)
    }

    /// A guest currently in the cabin cannot have their booking deleted.
    pub const fn can_delete(&self) -> bool {
        !matches!(self, BookingStatus::CheckedIn)
    }

    /// Whether a booking in this status blocks its dates for new stays.
    ///
    /// Callers use this to pick the stays they put in
    /// [`crate::CabinSnapshot::existing_stays`].
    pub const fn occupies_cabin(&self) -> bool {
        !matches!(self, BookingStatus::CheckedOut)
    }

    /// Checks a change of status on a stored booking.
    ///
    /// | From | To | Guard |
    /// |---|---|---|
    /// | unconfirmed | checked-in | `is_paid` |
    /// | checked-in | checked-out | none |
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidStatusTransition`] for every other pair,
    /// and for a check-in without payment.
    pub fn validate_transition(&self, next: BookingStatus, is_paid: bool) -> CoreResult<()> {
        let reject = |reason: &str| {
            Err(CoreError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
                reason: reason.to_string(),
            })
        };

        match (self, next) {
            (BookingStatus::Unconfirmed, BookingStatus::CheckedIn) => {
                if is_paid {
                    Ok(())
                } else {
                    reject("payment required before check-in")
                }
            }
            (BookingStatus::CheckedIn, BookingStatus::CheckedOut) => Ok(()),
            (BookingStatus::CheckedOut, _) => reject("booking is already checked out"),
            _ => reject("transition not permitted by booking lifecycle"),
        }
    }
}

/// Guards on the "admit and check in now" transition.
///
/// Records a `status` violation when the stay does not start on `today` and
/// an `isPaid` violation when the booking is unpaid. Both are evaluated
/// independently. A missing start date is reported by the date rules, not
/// here.
pub(crate) fn check_in_guards(
    draft: &ReservationDraft,
    today: NaiveDate,
    violations: &mut Violations,
) {
    if !draft.is_checking_in_now {
        return;
    }

    if let Some(start) = draft.start_date {
        if start != today {
            violations.push(Field::Status, ViolationReason::NotStartingToday);
        }
    }

    if !draft.is_paid {
        violations.push(Field::IsPaid, ViolationReason::PaymentRequired);
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unconfirmed" => Ok(BookingStatus::Unconfirmed),
            "checked-in" => Ok(BookingStatus::CheckedIn),
            "checked-out" => Ok(BookingStatus::CheckedOut),
            other => Err(format!(
                "Unknown booking status: '{other}'. Valid options: unconfirmed, checked-in, checked-out"
            )),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
