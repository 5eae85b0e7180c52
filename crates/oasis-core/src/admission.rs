//! # Admission Validator
//!
//! Decides whether a booking draft may be stored, and prices it when it may.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field          Rule                                                    │
//! │  ─────────────  ───────────────────────────────────────────────────     │
//! │  guestId        a guest is selected                                     │
//! │  numGuests      present, ≥ 1, ≤ maxGuestsPerBooking, ≤ cabin capacity  │
//! │  startDate      present, not before today                               │
//! │  endDate        present, after startDate,                              │
//! │                 minBookingLength ≤ nights ≤ maxBookingLength           │
//! │  dateRange      no night already taken in the cabin  (conflict)         │
//! │  status         checking in ⇒ stay starts today                         │
//! │  isPaid         checking in ⇒ paid                                      │
//! │  observations   present, when the settings ask for it                  │
//! │  cabin          nightly rate after discount is positive                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is evaluated on every call so the form can show all messages at
//! once. A draft is either fully admitted or not admitted at all.
//!
//! The overlap rule reads a snapshot the caller fetched earlier. Two desks
//! booking the same nights at the same moment can both pass it; the
//! bookings table's exclusion constraint is what actually prevents the
//! double booking.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, Field, ViolationReason, Violations};
use crate::interval::IntervalSet;
use crate::status::{check_in_guards, BookingStatus};
use crate::stay;
use crate::types::{AdmittedReservation, CabinSnapshot, ReservationDraft, Settings, StayRange};
use crate::validation::validate_settings;

/// Outcome of evaluating a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Admission {
    /// Every rule passed.
    Admitted(AdmittedReservation),
    /// At least one rule failed; all failures are listed.
    Rejected(Violations),
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_))
    }

    pub fn admitted(&self) -> Option<&AdmittedReservation> {
        match self {
            Admission::Admitted(reservation) => Some(reservation),
            Admission::Rejected(_) => None,
        }
    }

    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Admission::Admitted(_) => None,
            Admission::Rejected(violations) => Some(violations),
        }
    }

    pub fn into_result(self) -> Result<AdmittedReservation, Violations> {
        match self {
            Admission::Admitted(reservation) => Ok(reservation),
            Admission::Rejected(violations) => Err(violations),
        }
    }
}

/// Evaluates `draft` against `cabin` and `settings`.
///
/// `today` is the desk's calendar date; it is never read from the clock here.
///
/// # Errors
///
/// Returns [`crate::CoreError::Configuration`] when `settings` are unusable.
/// Bad draft input is never an error; it comes back as
/// [`Admission::Rejected`].
pub fn validate(
    draft: &ReservationDraft,
    cabin: &CabinSnapshot,
    settings: &Settings,
    today: NaiveDate,
) -> CoreResult<Admission> {
    validate_settings(settings)?;

    let mut violations = Violations::new();

    if draft.guest_id.is_none() {
        violations.push(Field::GuestId, ViolationReason::GuestRequired);
    }

    let guest_count = check_guest_count(draft.guest_count, cabin, settings, &mut violations);

    let range = check_dates(draft, today, &mut violations);

    if let Some(range) = range {
        let occupancy = IntervalSet::build(&cabin.existing_stays);
        if occupancy.overlaps(&range) {
            violations.push(Field::DateRange, ViolationReason::DatesAlreadyBooked);
        }
        check_length(stay::nights(range.start, range.end), settings, &mut violations);
    }

    check_in_guards(draft, today, &mut violations);

    if settings.require_observations && observations(draft).is_none() {
        violations.push(Field::Observations, ViolationReason::ObservationsRequired);
    }

    match cabin.nightly_rate() {
        Some(rate) if !rate.is_positive() => {
            violations.push(Field::Cabin, ViolationReason::NonPositiveRate { rate });
        }
        Some(_) => {}
        None => violations.push(Field::Cabin, ViolationReason::PriceOutOfRange),
    }

    // With no violations every required field is present.
    match (draft.guest_id, guest_count, range) {
        (Some(guest_id), Some(guest_count), Some(range)) if violations.is_empty() => {
            let nights = stay::nights(range.start, range.end);
            let Ok(price) =
                stay::price(cabin, nights, guest_count, draft.wants_breakfast, settings)
            else {
                violations.push(Field::Cabin, ViolationReason::PriceOutOfRange);
                return Ok(Admission::Rejected(violations));
            };

            Ok(Admission::Admitted(AdmittedReservation {
                cabin_id: cabin.id,
                guest_id,
                guest_count,
                start_date: range.start,
                end_date: range.end,
                wants_breakfast: draft.wants_breakfast,
                is_paid: draft.is_paid,
                observations: observations(draft).map(str::to_string),
                nights,
                base_price: price.base_price,
                extras_price: price.extras_price,
                total_price: price.total_price,
                status: BookingStatus::initial(draft.is_checking_in_now),
            }))
        }
        _ => Ok(Admission::Rejected(violations)),
    }
}

/// Checks the guest count; returns it when it is at least one guest.
fn check_guest_count(
    guest_count: Option<i64>,
    cabin: &CabinSnapshot,
    settings: &Settings,
    violations: &mut Violations,
) -> Option<u32> {
    let Some(count) = guest_count else {
        violations.push(Field::NumGuests, ViolationReason::GuestCountRequired);
        return None;
    };

    if count < 1 {
        violations.push(Field::NumGuests, ViolationReason::TooFewGuests);
        return None;
    }

    if count > i64::from(settings.max_guests_per_booking) {
        violations.push(
            Field::NumGuests,
            ViolationReason::TooManyGuests {
                max: settings.max_guests_per_booking,
            },
        );
    }

    if count > i64::from(cabin.max_capacity) {
        violations.push(
            Field::NumGuests,
            ViolationReason::OverCapacity {
                capacity: cabin.max_capacity,
            },
        );
    }

    // A count past u32 has already failed both limits above.
    u32::try_from(count).ok()
}

/// Checks presence and order of the dates; returns the range when usable.
fn check_dates(
    draft: &ReservationDraft,
    today: NaiveDate,
    violations: &mut Violations,
) -> Option<StayRange> {
    match draft.start_date {
        None => violations.push(Field::StartDate, ViolationReason::StartDateRequired),
        Some(start) if start < today => {
            violations.push(Field::StartDate, ViolationReason::StartsInPast);
        }
        Some(_) => {}
    }

    if draft.end_date.is_none() {
        violations.push(Field::EndDate, ViolationReason::EndDateRequired);
    }

    let (start, end) = (draft.start_date?, draft.end_date?);
    match StayRange::new(start, end) {
        Ok(range) => Some(range),
        Err(_) => {
            violations.push(Field::EndDate, ViolationReason::EndNotAfterStart);
            None
        }
    }
}

fn check_length(nights: i64, settings: &Settings, violations: &mut Violations) {
    if nights < i64::from(settings.min_booking_length) {
        violations.push(
            Field::EndDate,
            ViolationReason::StayTooShort {
                min: settings.min_booking_length,
            },
        );
    }

    if nights > i64::from(settings.max_booking_length) {
        violations.push(
            Field::EndDate,
            ViolationReason::StayTooLong {
                max: settings.max_booking_length,
            },
        );
    }
}

/// Observations with blank text treated as absent.
fn observations(draft: &ReservationDraft) -> Option<&str> {
    draft
        .observations
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, Violation};
    use crate::money::Money;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn settings() -> Settings {
        Settings {
            min_booking_length: 2,
            max_booking_length: 10,
            max_guests_per_booking: 6,
            breakfast_price: Money::from_major(15),
            require_observations: false,
        }
    }

    fn cabin() -> CabinSnapshot {
        CabinSnapshot {
            id: 9,
            name: "008".to_string(),
            max_capacity: 4,
            regular_price: Money::from_major(200),
            discount: Money::from_major(20),
            existing_stays: vec![],
        }
    }

    fn draft() -> ReservationDraft {
        ReservationDraft {
            guest_id: Some(31),
            guest_count: Some(2),
            start_date: Some(d(10)),
            end_date: Some(d(13)),
            wants_breakfast: false,
            is_paid: false,
            is_checking_in_now: false,
            observations: None,
        }
    }

    fn rejected(admission: Admission) -> Violations {
        match admission {
            Admission::Rejected(violations) => violations,
            Admission::Admitted(r) => panic!("expected rejection, got {r:?}"),
        }
    }

    #[test]
    fn test_admits_valid_draft() {
        let admission = validate(&draft(), &cabin(), &settings(), d(1)).unwrap();
        let reservation = admission.admitted().unwrap();
        assert_eq!(reservation.cabin_id, 9);
        assert_eq!(reservation.guest_id, 31);
        assert_eq!(reservation.nights, 3);
        assert_eq!(reservation.base_price, Money::from_major(540));
        assert_eq!(reservation.extras_price, Money::zero());
        assert_eq!(reservation.total_price, Money::from_major(540));
        assert_eq!(reservation.status, BookingStatus::Unconfirmed);
    }

    #[test]
    fn test_empty_draft_reports_every_missing_field() {
        let violations = rejected(
            validate(&ReservationDraft::default(), &cabin(), &settings(), d(1)).unwrap(),
        );
        assert!(violations.has_field(Field::GuestId));
        assert!(violations.has_field(Field::NumGuests));
        assert!(violations.has_field(Field::StartDate));
        assert!(violations.has_field(Field::EndDate));
        assert_eq!(violations.len(), 4);
    }

    #[test]
    fn test_guest_count_limits() {
        let mut zero = draft();
        zero.guest_count = Some(0);
        let v = rejected(validate(&zero, &cabin(), &settings(), d(1)).unwrap());
        assert_eq!(
            v.iter().map(|v| &v.reason).collect::<Vec<_>>(),
            vec![&ViolationReason::TooFewGuests]
        );

        // Over the cabin capacity but within the hotel maximum.
        let mut five = draft();
        five.guest_count = Some(5);
        let v = rejected(validate(&five, &cabin(), &settings(), d(1)).unwrap());
        assert_eq!(
            v.iter().map(|v| &v.reason).collect::<Vec<_>>(),
            vec![&ViolationReason::OverCapacity { capacity: 4 }]
        );

        // Over both limits: two distinct reasons.
        let mut seven = draft();
        seven.guest_count = Some(7);
        let v = rejected(validate(&seven, &cabin(), &settings(), d(1)).unwrap());
        assert_eq!(v.for_field(Field::NumGuests).count(), 2);
    }

    #[test]
    fn test_negative_guest_count_is_too_few() {
        let draft: ReservationDraft = serde_json::from_str(
            r#"{"guestId":31,"numGuests":-2,"startDate":"2024-06-10","endDate":"2024-06-13"}"#,
        )
        .unwrap();
        let v = rejected(validate(&draft, &cabin(), &settings(), d(1)).unwrap());
        assert_eq!(
            v.iter().map(|v| &v.reason).collect::<Vec<_>>(),
            vec![&ViolationReason::TooFewGuests]
        );

        let mut huge = self::draft();
        huge.guest_count = Some(i64::from(u32::MAX) + 1);
        let v = rejected(validate(&huge, &cabin(), &settings(), d(1)).unwrap());
        assert_eq!(v.for_field(Field::NumGuests).count(), 2);
    }

    #[test]
    fn test_unpriceable_stay_is_rejected() {
        let mut pricey = cabin();
        pricey.regular_price = Money::from_cents(i64::MAX / 2);
        pricey.discount = Money::zero();
        let v = rejected(validate(&draft(), &pricey, &settings(), d(1)).unwrap());
        assert_eq!(
            v.iter().collect::<Vec<_>>(),
            vec![&Violation::new(Field::Cabin, ViolationReason::PriceOutOfRange)]
        );

        let mut upside_down = cabin();
        upside_down.regular_price = Money::from_cents(i64::MAX);
        upside_down.discount = Money::from_cents(-1);
        let v = rejected(validate(&draft(), &upside_down, &settings(), d(1)).unwrap());
        assert!(v
            .for_field(Field::Cabin)
            .any(|v| v.reason == ViolationReason::PriceOutOfRange));
    }

    #[test]
    fn test_start_in_past() {
        let v = rejected(validate(&draft(), &cabin(), &settings(), d(11)).unwrap());
        assert!(v
            .for_field(Field::StartDate)
            .any(|v| v.reason == ViolationReason::StartsInPast));
    }

    #[test]
    fn test_start_today_is_allowed() {
        let admission = validate(&draft(), &cabin(), &settings(), d(10)).unwrap();
        assert!(admission.is_admitted());
    }

    #[test]
    fn test_end_not_after_start() {
        let mut same_day = draft();
        same_day.end_date = same_day.start_date;
        let v = rejected(validate(&same_day, &cabin(), &settings(), d(1)).unwrap());
        assert_eq!(v.len(), 1);
        assert!(v
            .for_field(Field::EndDate)
            .any(|v| v.reason == ViolationReason::EndNotAfterStart));
    }

    #[test]
    fn test_length_limits() {
        let mut short = draft();
        short.end_date = Some(d(11));
        let v = rejected(validate(&short, &cabin(), &settings(), d(1)).unwrap());
        assert!(v
            .iter()
            .any(|v| v.reason == ViolationReason::StayTooShort { min: 2 }));

        let mut long = draft();
        long.end_date = Some(d(21));
        let v = rejected(validate(&long, &cabin(), &settings(), d(1)).unwrap());
        assert!(v
            .iter()
            .any(|v| v.reason == ViolationReason::StayTooLong { max: 10 }));

        let mut longest = draft();
        longest.end_date = Some(d(20));
        assert!(validate(&longest, &cabin(), &settings(), d(1))
            .unwrap()
            .is_admitted());
    }

    #[test]
    fn test_conflict_with_existing_stay() {
        let mut booked = cabin();
        booked.existing_stays = vec![StayRange {
            start: d(12),
            end: d(15),
        }];
        let v = rejected(validate(&draft(), &booked, &settings(), d(1)).unwrap());
        assert!(v.has_conflict());
        assert!(v.has_field(Field::DateRange));

        // Leaving on the day the next guest arrives is fine.
        booked.existing_stays = vec![StayRange {
            start: d(13),
            end: d(15),
        }];
        assert!(validate(&draft(), &booked, &settings(), d(1))
            .unwrap()
            .is_admitted());
    }

    #[test]
    fn test_check_in_now() {
        let mut walk_in = draft();
        walk_in.is_checking_in_now = true;
        walk_in.is_paid = true;
        let reservation = validate(&walk_in, &cabin(), &settings(), d(10))
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(reservation.status, BookingStatus::CheckedIn);
        assert!(reservation.is_paid);

        walk_in.is_paid = false;
        let v = rejected(validate(&walk_in, &cabin(), &settings(), d(9)).unwrap());
        assert!(v.has_field(Field::IsPaid));
        assert!(v.has_field(Field::Status));
    }

    #[test]
    fn test_observations_toggle() {
        let mut strict = settings();
        strict.require_observations = true;

        let mut blank = draft();
        blank.observations = Some("   ".to_string());
        let v = rejected(validate(&blank, &cabin(), &strict, d(1)).unwrap());
        assert!(v.has_field(Field::Observations));

        // Not required by default.
        assert!(validate(&blank, &cabin(), &settings(), d(1))
            .unwrap()
            .is_admitted());

        let mut noted = draft();
        noted.observations = Some("  late arrival ".to_string());
        let reservation = validate(&noted, &cabin(), &strict, d(1))
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(reservation.observations.as_deref(), Some("late arrival"));
    }

    #[test]
    fn test_non_positive_rate_is_flagged() {
        let mut giveaway = cabin();
        giveaway.discount = giveaway.regular_price;
        let v = rejected(validate(&draft(), &giveaway, &settings(), d(1)).unwrap());
        assert_eq!(
            v.for_field(Field::Cabin).next().map(|v| &v.reason),
            Some(&ViolationReason::NonPositiveRate {
                rate: Money::zero()
            })
        );
    }

    #[test]
    fn test_bad_settings_are_fatal() {
        let mut broken = settings();
        broken.min_booking_length = 0;
        let err = validate(&draft(), &cabin(), &broken, d(1)).unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn test_admission_wire_shape() {
        let admission = validate(&ReservationDraft::default(), &cabin(), &settings(), d(1)).unwrap();
        let json = serde_json::to_value(&admission).unwrap();
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(json["detail"][0]["field"], "guestId");

        let admission = validate(&draft(), &cabin(), &settings(), d(1)).unwrap();
        let json = serde_json::to_value(&admission).unwrap();
        assert_eq!(json["outcome"], "admitted");
        assert_eq!(json["detail"]["numNights"], 3);
        assert_eq!(json["detail"]["status"], "unconfirmed");
    }
}
