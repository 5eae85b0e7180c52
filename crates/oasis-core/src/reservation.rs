//! # Reservation Assembler
//!
//! The three calls the booking form makes into the engine.
//!
//! ## Booking Form Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Cabin picked                                                        │
//! │       └─► compute_excluded_date_ranges ──► date picker greys out days   │
//! │                                                                         │
//! │  2. Dates / guests / breakfast edited                                   │
//! │       └─► price_quote ──────────────────► "Total price" field           │
//! │                                                                         │
//! │  3. Create pressed                                                      │
//! │       └─► validate_reservation                                          │
//! │             ├── Admitted ──► booking service stores the row             │
//! │             └── Rejected ──► messages under each field                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is cached; every call works from the snapshot it is given.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::admission::{self, Admission};
use crate::error::{CoreError, CoreResult};
use crate::interval::IntervalSet;
use crate::stay;
use crate::types::{CabinSnapshot, PriceQuote, ReservationDraft, Settings, StayRange};
use crate::validation::validate_settings;

/// Evaluates a booking draft for `cabin`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use oasis_core::{validate_reservation, BookingStatus, CabinSnapshot, Money, ReservationDraft, Settings};
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
/// let settings = Settings {
///     min_booking_length: 1,
///     max_booking_length: 30,
///     max_guests_per_booking: 4,
///     breakfast_price: Money::from_major(15),
///     require_observations: false,
/// };
/// let cabin = CabinSnapshot {
///     id: 1,
///     name: "001".into(),
///     max_capacity: 4,
///     regular_price: Money::from_major(100),
///     discount: Money::zero(),
///     existing_stays: vec![],
/// };
/// let draft = ReservationDraft {
///     guest_id: Some(1),
///     guest_count: Some(2),
///     start_date: Some(d(1)),
///     end_date: Some(d(4)),
///     wants_breakfast: true,
///     ..Default::default()
/// };
///
/// let admission = validate_reservation(&draft, &cabin, &settings, d(1)).unwrap();
/// let booking = admission.admitted().unwrap();
/// assert_eq!(booking.total_price, Money::from_major(390));
/// assert_eq!(booking.status, BookingStatus::Unconfirmed);
/// ```
///
/// # Errors
///
/// Returns [`CoreError::Configuration`] when `settings` are unusable.
pub fn validate_reservation(
    draft: &ReservationDraft,
    cabin: &CabinSnapshot,
    settings: &Settings,
    today: NaiveDate,
) -> CoreResult<Admission> {
    let admission = admission::validate(draft, cabin, settings, today).inspect_err(|err| {
        warn!(cabin_id = cabin.id, error = %err, "Reservation not evaluated");
    })?;

    match &admission {
        Admission::Admitted(booking) => debug!(
            cabin_id = cabin.id,
            nights = booking.nights,
            total_cents = booking.total_price.cents(),
            status = %booking.status,
            "Reservation admitted"
        ),
        Admission::Rejected(violations) => debug!(
            cabin_id = cabin.id,
            violations = violations.len(),
            conflict = violations.has_conflict(),
            "Reservation rejected"
        ),
    }

    Ok(admission)
}

/// Date ranges the picker must disable for `cabin`, earliest first.
///
/// Overlapping and back-to-back stays come back as one range.
pub fn compute_excluded_date_ranges(cabin: &CabinSnapshot) -> Vec<StayRange> {
    IntervalSet::build(&cabin.existing_stays).into_ranges()
}

/// Prices a stay while the form is being edited.
///
/// Independent of admission: a quote is produced for any valid range, even
/// one that is already booked or too long.
///
/// # Errors
///
/// - [`CoreError::InvalidStayRange`] when `end` is not after `start`
/// - [`CoreError::Configuration`] when `settings` are unusable
/// - [`CoreError::AmountOutOfRange`] when the price does not fit in [`Money`](crate::Money)
pub fn price_quote(
    cabin: &CabinSnapshot,
    start: NaiveDate,
    end: NaiveDate,
    guest_count: u32,
    wants_breakfast: bool,
    settings: &Settings,
) -> CoreResult<PriceQuote> {
    validate_settings(settings).map_err(CoreError::from)?;
    let range = StayRange::new(start, end)?;

    let nights = stay::nights(range.start, range.end);
    let price = stay::price(cabin, nights, guest_count, wants_breakfast, settings)?;

    debug!(
        cabin_id = cabin.id,
        nights,
        total_cents = price.total_price.cents(),
        "Price quoted"
    );

    Ok(PriceQuote::new(nights, price))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, ViolationReason};
    use crate::money::Money;
    use crate::status::BookingStatus;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn r(start: u32, end: u32) -> StayRange {
        StayRange {
            start: d(start),
            end: d(end),
        }
    }

    /// `{min:1, max:30, maxGuests:4, breakfastPrice:15}`
    fn settings() -> Settings {
        Settings {
            min_booking_length: 1,
            max_booking_length: 30,
            max_guests_per_booking: 4,
            breakfast_price: Money::from_major(15),
            require_observations: false,
        }
    }

    /// `{capacity:4, regularPrice:100, discount:0, existingStays:[]}`
    fn cabin() -> CabinSnapshot {
        CabinSnapshot {
            id: 1,
            name: "001".to_string(),
            max_capacity: 4,
            regular_price: Money::from_major(100),
            discount: Money::zero(),
            existing_stays: vec![],
        }
    }

    /// Two guests, June 1 → June 4, breakfast, unpaid, not checking in.
    fn draft() -> ReservationDraft {
        ReservationDraft {
            guest_id: Some(11),
            guest_count: Some(2),
            start_date: Some(d(1)),
            end_date: Some(d(4)),
            wants_breakfast: true,
            is_paid: false,
            is_checking_in_now: false,
            observations: None,
        }
    }

    const TODAY: u32 = 1;

    #[test]
    fn test_scenario_a_admitted_and_priced() {
        let admission = validate_reservation(&draft(), &cabin(), &settings(), d(TODAY)).unwrap();
        let booking = admission.into_result().unwrap();
        assert_eq!(booking.nights, 3);
        assert_eq!(booking.base_price, Money::from_major(300));
        assert_eq!(booking.extras_price, Money::from_major(90));
        assert_eq!(booking.total_price, Money::from_major(390));
        assert_eq!(booking.status, BookingStatus::Unconfirmed);
    }

    #[test]
    fn test_scenario_b_conflict() {
        let mut booked = cabin();
        booked.existing_stays = vec![r(2, 3)];
        let admission = validate_reservation(&draft(), &booked, &settings(), d(TODAY)).unwrap();
        let violations = admission.violations().unwrap();
        assert!(violations.has_conflict());
        assert!(violations
            .for_field(Field::DateRange)
            .any(|v| v.reason == ViolationReason::DatesAlreadyBooked));
    }

    #[test]
    fn test_scenario_c_too_many_guests() {
        let mut five = draft();
        five.guest_count = Some(5);
        let admission = validate_reservation(&five, &cabin(), &settings(), d(TODAY)).unwrap();
        let violations = admission.violations().unwrap();
        assert!(violations
            .for_field(Field::NumGuests)
            .any(|v| v.reason == ViolationReason::TooManyGuests { max: 4 }));
    }

    #[test]
    fn test_scenario_d_check_in_unpaid() {
        let mut walk_in = draft();
        walk_in.is_checking_in_now = true;
        walk_in.is_paid = false;

        // Starts today: only the payment rule fires.
        let admission = validate_reservation(&walk_in, &cabin(), &settings(), d(1)).unwrap();
        let violations = admission.violations().unwrap();
        assert!(violations.has_field(Field::IsPaid));
        assert!(!violations.has_field(Field::Status));

        // Starts later: both fire.
        walk_in.start_date = Some(d(2));
        walk_in.end_date = Some(d(5));
        let admission = validate_reservation(&walk_in, &cabin(), &settings(), d(1)).unwrap();
        let violations = admission.violations().unwrap();
        assert!(violations.has_field(Field::IsPaid));
        assert!(violations
            .for_field(Field::Status)
            .any(|v| v.reason == ViolationReason::NotStartingToday));
    }

    #[test]
    fn test_checking_in_always_requires_payment() {
        for is_paid in [true, false] {
            let mut walk_in = draft();
            walk_in.is_checking_in_now = true;
            walk_in.is_paid = is_paid;
            let admission = validate_reservation(&walk_in, &cabin(), &settings(), d(1)).unwrap();
            match admission {
                Admission::Admitted(booking) => {
                    assert!(booking.is_paid);
                    assert_eq!(booking.status, BookingStatus::CheckedIn);
                }
                Admission::Rejected(violations) => {
                    assert!(!is_paid);
                    assert!(violations.has_field(Field::IsPaid));
                }
            }
        }
    }

    #[test]
    fn test_admitted_never_overlaps_existing_stays() {
        let mut busy = cabin();
        busy.existing_stays = vec![r(5, 8), r(12, 13), r(20, 25)];
        let occupancy = IntervalSet::build(&busy.existing_stays);

        for start in 1..28 {
            for end in (start + 1)..30 {
                let mut attempt = draft();
                attempt.start_date = Some(d(start));
                attempt.end_date = Some(d(end));
                let admission =
                    validate_reservation(&attempt, &busy, &settings(), d(TODAY)).unwrap();
                if let Some(booking) = admission.admitted() {
                    assert!(!occupancy.overlaps(&booking.stay()));
                    assert_eq!(booking.nights, stay::nights(d(start), d(end)));
                    assert!(booking.nights >= i64::from(settings().min_booking_length));
                } else {
                    let violations = admission.violations().unwrap();
                    assert_eq!(violations.has_conflict(), occupancy.overlaps(&r(start, end)));
                }
            }
        }
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut booked = cabin();
        booked.existing_stays = vec![r(2, 3)];
        let first = validate_reservation(&draft(), &booked, &settings(), d(TODAY)).unwrap();
        let second = validate_reservation(&draft(), &booked, &settings(), d(TODAY)).unwrap();
        assert_eq!(first, second);

        let first = validate_reservation(&draft(), &cabin(), &settings(), d(TODAY)).unwrap();
        let second = validate_reservation(&draft(), &cabin(), &settings(), d(TODAY)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_excluded_ranges_are_merged_and_sorted() {
        let mut busy = cabin();
        busy.existing_stays = vec![r(10, 12), r(2, 4), r(4, 6), r(11, 14)];
        assert_eq!(
            compute_excluded_date_ranges(&busy),
            vec![r(2, 6), r(10, 14)]
        );
        assert!(compute_excluded_date_ranges(&cabin()).is_empty());
    }

    #[test]
    fn test_price_quote() {
        let quote = price_quote(&cabin(), d(1), d(4), 2, true, &settings()).unwrap();
        assert_eq!(
            quote,
            PriceQuote {
                nights: 3,
                base_price: Money::from_major(300),
                extras_price: Money::from_major(90),
                total_price: Money::from_major(390),
            }
        );

        let quote = price_quote(&cabin(), d(1), d(4), 2, false, &settings()).unwrap();
        assert_eq!(quote.extras_price, Money::zero());
        assert_eq!(quote.total_price, quote.base_price);
    }

    #[test]
    fn test_price_quote_ignores_occupancy() {
        let mut booked = cabin();
        booked.existing_stays = vec![r(2, 3)];
        assert!(price_quote(&booked, d(1), d(4), 2, true, &settings()).is_ok());
    }

    #[test]
    fn test_overpriced_stay_is_rejected_not_panicking() {
        let mut pricey = cabin();
        pricey.regular_price = Money::from_cents(i64::MAX / 2);
        let admission = validate_reservation(&draft(), &pricey, &settings(), d(TODAY)).unwrap();
        let violations = admission.violations().unwrap();
        assert!(violations
            .for_field(Field::Cabin)
            .any(|v| v.reason == ViolationReason::PriceOutOfRange));
    }

    #[test]
    fn test_price_quote_out_of_range() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(30000, 1, 1).unwrap();
        let quote = price_quote(&cabin(), start, end, u32::MAX, true, &settings());
        assert!(matches!(quote, Err(CoreError::AmountOutOfRange { .. })));

        let mut pricey = cabin();
        pricey.regular_price = Money::from_cents(i64::MAX / 2);
        let quote = price_quote(&pricey, d(1), d(4), 2, false, &settings());
        assert_eq!(
            quote,
            Err(CoreError::AmountOutOfRange { what: "base price" })
        );
    }

    #[test]
    fn test_price_quote_rejects_inverted_range() {
        assert_eq!(
            price_quote(&cabin(), d(4), d(4), 2, true, &settings()),
            Err(CoreError::InvalidStayRange {
                start: d(4),
                end: d(4)
            })
        );
    }
}
