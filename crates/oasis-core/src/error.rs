//! # Error Types
//!
//! Domain-specific error types for oasis-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Recoverable (returned as data, caller re-prompts the user)            │
//! │  └── Violation          - field + reason, collected per evaluation     │
//! │      ├── Validation     - missing dates, too many guests, ...          │
//! │      └── Conflict       - requested dates are already booked           │
//! │                                                                         │
//! │  Fatal (returned as Err, no partial result)                            │
//! │  └── CoreError                                                         │
//! │      ├── Configuration  - missing / invalid hotel settings             │
//! │      ├── InvalidDate    - unparseable date where one is required       │
//! │      ├── InvalidStayRange                                              │
//! │      └── InvalidStatusTransition                                       │
//! │                                                                         │
//! │  Flow: Violations → admission result → booking form                    │
//! │        CoreError  → DeskError (app) → exit code                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Expected bad input is NEVER an `Err`; it is a [`Violation`]
//! 3. Every violation for one evaluation is returned at once
//! 4. Each reason maps to a user-facing message

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Hard failures of an evaluation.
///
/// When one of these is returned the engine produced no decision at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Hotel settings are missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A date string could not be parsed.
    #[error("{field} is not a valid date: '{value}'")]
    InvalidDate { field: String, value: String },

    /// A stay range whose end is not after its start was passed where a
    /// valid range is required.
    #[error("Invalid stay range: {end} is not after {start}")]
    InvalidStayRange { start: NaiveDate, end: NaiveDate },

    /// A price component does not fit in [`Money`].
    ///
    /// ## When This Occurs
    /// - Absurd regular price or discount in the cabin snapshot
    /// - Guest count or stay length large enough to overflow a total
    #[error("Amount out of range: {what} cannot be represented")]
    AmountOutOfRange { what: &'static str },

    /// A booking status change not permitted by the lifecycle.
    ///
    /// ## When This Occurs
    /// - Checking in a booking that is not unconfirmed
    /// - Checking in without payment
    /// - Checking out a booking that is not checked in
    #[error("Cannot move booking from {from} to {to}: {reason}")]
    InvalidStatusTransition {
        from: String,
        to: String,
        reason: String,
    },
}

// =============================================================================
// Configuration Error
// =============================================================================

/// Problems with the hotel settings row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required setting was not supplied by any source.
    #[error("setting '{name}' is missing")]
    MissingSetting { name: &'static str },

    /// A setting is present but its value is unusable.
    #[error("setting '{name}' is invalid: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

// =============================================================================
// Violations
// =============================================================================

/// The form field a violation is attached to.
///
/// Wire names match the booking and cabin form field names so the frontend
/// can place each message next to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    GuestId,
    NumGuests,
    StartDate,
    EndDate,
    /// The requested range as a whole (used for booking conflicts).
    DateRange,
    Observations,
    IsPaid,
    Status,
    Cabin,
    MaxCapacity,
    RegularPrice,
    Discount,
}

impl Field {
    /// Returns the wire name of the field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Field::GuestId => "guestId",
            Field::NumGuests => "numGuests",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
            Field::DateRange => "dateRange",
            Field::Observations => "observations",
            Field::IsPaid => "isPaid",
            Field::Status => "status",
            Field::Cabin => "cabin",
            Field::MaxCapacity => "maxCapacity",
            Field::RegularPrice => "regularPrice",
            Field::Discount => "discount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected.
///
/// The `Display` text is the message shown under the form field.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ViolationReason {
    #[error("a guest must be selected")]
    GuestRequired,

    #[error("number of guests is required")]
    GuestCountRequired,

    #[error("number of guests cannot be less than 1")]
    TooFewGuests,

    #[error("number of guests cannot be more than {max}")]
    TooManyGuests { max: u32 },

    #[error("cabin holds at most {capacity} guests")]
    OverCapacity { capacity: u32 },

    #[error("start date is required")]
    StartDateRequired,

    #[error("end date is required")]
    EndDateRequired,

    #[error("stays cannot start in the past")]
    StartsInPast,

    #[error("end date must be after start date")]
    EndNotAfterStart,

    #[error("cannot book already booked dates")]
    DatesAlreadyBooked,

    #[error("stay must be at least {min} nights")]
    StayTooShort { min: u32 },

    #[error("stay cannot be longer than {max} nights")]
    StayTooLong { max: u32 },

    #[error("booking does not start today")]
    NotStartingToday,

    #[error("payment required before check-in")]
    PaymentRequired,

    #[error("observations are required")]
    ObservationsRequired,

    /// Regular price minus discount is zero or negative.
    #[error("nightly rate after discount must be positive, got {rate}")]
    NonPositiveRate { rate: Money },

    /// The stay cannot be priced without overflowing.
    #[error("stay price is too large to compute")]
    PriceOutOfRange,

    #[error("max capacity should be at least 1")]
    CapacityTooSmall,

    #[error("regular price should be at least {min}")]
    RegularPriceTooLow { min: Money },

    #[error("discount cannot be negative")]
    NegativeDiscount,

    #[error("discount cannot be more than regular price")]
    DiscountAboveRegularPrice,
}

/// Coarse grouping of reasons, used for telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    /// Ordinary data-entry or business rule failure.
    Validation,
    /// The requested dates collide with an existing stay.
    Conflict,
}

impl ViolationReason {
    /// Returns the telemetry category of this reason.
    pub const fn category(&self) -> ViolationCategory {
        match self {
            ViolationReason::DatesAlreadyBooked => ViolationCategory::Conflict,
            _ => ViolationCategory::Validation,
        }
    }
}

/// One broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Violation {
    pub field: Field,
    pub reason: ViolationReason,
}

impl Violation {
    pub const fn new(field: Field, reason: ViolationReason) -> Self {
        Violation { field, reason }
    }

    /// True if this violation is a date conflict.
    #[inline]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.reason.category(), ViolationCategory::Conflict)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Every violation found in one evaluation, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Violations(Vec::new())
    }

    /// Records a violation.
    pub fn push(&mut self, field: Field, reason: ViolationReason) {
        self.0.push(Violation::new(field, reason));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Violations attached to `field`.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &Violation> {
        self.0.iter().filter(move |v| v.field == field)
    }

    /// True if any violation is attached to `field`.
    pub fn has_field(&self, field: Field) -> bool {
        self.for_field(field).next().is_some()
    }

    /// True if any violation is a date conflict.
    pub fn has_conflict(&self) -> bool {
        self.0.iter().any(Violation::is_conflict)
    }

    /// Returns `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Extend<Violation> for Violations {
    fn extend<T: IntoIterator<Item = Violation>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
