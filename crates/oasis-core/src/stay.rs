//! # Stay Calculator
//!
//! Night counts and canonical stay prices.
//!
//! ## Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base   = (regular price - discount) × nights                          │
//! │  extras = breakfast × nights × guests        (only with breakfast)     │
//! │  total  = base + extras                                                 │
//! │                                                                         │
//! │  Example: ₹100/night, 3 nights, 2 guests, ₹15 breakfast                │
//! │    base = 300, extras = 90, total = 390                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount is a flat amount per night and is subtracted once. Breakfast
//! is only charged when the guests asked for it.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CabinSnapshot, Settings, StayPrice};

/// Number of nights between arrival and departure.
///
/// Callers guarantee `start < end`; the result is then at least 1.
///
/// ```rust
/// use chrono::NaiveDate;
/// use oasis_core::stay::nights;
///
/// let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
/// assert_eq!(nights(start, end), 3);
/// ```
#[inline]
pub fn nights(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Prices a stay.
///
/// A non-positive nightly rate is priced as-is; the admission validator is
/// what reports it.
///
/// # Errors
///
/// Returns [`CoreError::AmountOutOfRange`] when a component overflows
/// [`Money`].
pub fn price(
    cabin: &CabinSnapshot,
    nights: i64,
    guest_count: u32,
    wants_breakfast: bool,
    settings: &Settings,
) -> CoreResult<StayPrice> {
    let out_of_range = |what| CoreError::AmountOutOfRange { what };

    let base_price = cabin
        .nightly_rate()
        .ok_or_else(|| out_of_range("nightly rate"))?
        .checked_times(nights)
        .ok_or_else(|| out_of_range("base price"))?;

    let extras_price = if wants_breakfast {
        settings
            .breakfast_price
            .checked_times(nights)
            .and_then(|per_guest| per_guest.checked_times(i64::from(guest_count)))
            .ok_or_else(|| out_of_range("breakfast price"))?
    } else {
        Money::zero()
    };

    let total_price = base_price
        .checked_add(extras_price)
        .ok_or_else(|| out_of_range("total price"))?;

    Ok(StayPrice {
        base_price,
        extras_price,
        total_price,
    })
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDate`] naming `field` when `value` is not a
/// calendar date.
pub fn parse_date(field: &str, value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CoreError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
