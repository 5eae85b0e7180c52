//! # oasis-core: Reservation Admission & Pricing for The Wild Oasis
//!
//! This crate decides whether a booking may be created for a cabin and what
//! it costs. Everything is a pure function of the snapshot it is handed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Wild Oasis Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard (booking form)                     │   │
//! │  │    Cabin ──► Dates ──► Guests/Breakfast ──► Create              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ cabin snapshot + draft                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ oasis-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ interval  │  │   stay    │  │ admission │  │  status   │  │   │
//! │  │   │ occupied  │  │  nights   │  │   rules   │  │ lifecycle │  │   │
//! │  │   │   days    │  │  pricing  │  │ violations│  │  guards   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                   reservation (entry points)                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO DATABASE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ AdmittedReservation                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Booking service (persistence)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`reservation`] - Entry points: validate, excluded dates, price quote
//! - [`admission`] - Admission rules and the [`Admission`] outcome
//! - [`interval`] - Occupied days of a cabin
//! - [`stay`] - Night counts and stay pricing
//! - [`status`] - Booking lifecycle
//! - [`validation`] - Settings and cabin checks
//! - [`stats`] - Dashboard figures
//! - [`types`] - Snapshots, drafts and results
//! - [`money`] - Integer money
//! - [`error`] - Errors and violations
//!
//! ## Design Principles
//!
//! 1. **Today is an argument**: nothing reads the system clock
//! 2. **Collect, don't stop**: a rejected draft reports every broken rule
//! 3. **Integer Money**: amounts are minor units (i64)
//! 4. **Half-open stays**: `[start, end)`, so back-to-back bookings fit
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use oasis_core::{compute_excluded_date_ranges, CabinSnapshot, Money, StayRange};
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
//! let cabin = CabinSnapshot {
//!     id: 1,
//!     name: "001".into(),
//!     max_capacity: 2,
//!     regular_price: Money::from_major(250),
//!     discount: Money::zero(),
//!     existing_stays: vec![
//!         StayRange { start: d(8), end: d(10) },
//!         StayRange { start: d(2), end: d(5) },
//!         StayRange { start: d(5), end: d(6) },
//!     ],
//! };
//!
//! assert_eq!(
//!     compute_excluded_date_ranges(&cabin),
//!     vec![
//!         StayRange { start: d(2), end: d(6) },
//!         StayRange { start: d(8), end: d(10) },
//!     ]
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admission;
pub mod error;
pub mod interval;
pub mod money;
pub mod reservation;
pub mod stats;
pub mod status;
pub mod stay;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use admission::Admission;
pub use error::{
    ConfigurationError, CoreError, CoreResult, Field, Violation, ViolationCategory,
    ViolationReason, Violations,
};
pub use interval::IntervalSet;
pub use money::Money;
pub use reservation::{compute_excluded_date_ranges, price_quote, validate_reservation};
pub use status::BookingStatus;
pub use types::*;
