//! # Domain Types
//!
//! Inputs and outputs of the reservation engine.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUTS (read-only snapshots)            OUTPUTS                        │
//! │  ┌─────────────────┐                    ┌──────────────────────┐       │
//! │  │    Settings     │                    │ AdmittedReservation  │       │
//! │  │  min/max nights │                    │  draft fields        │       │
//! │  │  max guests     │──┐                 │  + nights            │       │
//! │  │  breakfast      │  │                 │  + base/extras/total │       │
//! │  └─────────────────┘  │   ┌─────────┐   │  + status            │       │
//! │  ┌─────────────────┐  ├──►│ engine  │──►└──────────────────────┘       │
//! │  │  CabinSnapshot  │  │   └─────────┘   ┌──────────────────────┐       │
//! │  │  capacity, rate │──┤                 │     PriceQuote       │       │
//! │  │  existing stays │  │                 └──────────────────────┘       │
//! │  └─────────────────┘  │                                                │
//! │  ┌─────────────────┐  │                                                │
//! │  │ReservationDraft │──┘                                                │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire names are camelCase to match the booking API rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::status::BookingStatus;

/// Identifier of a cabin row.
pub type CabinId = i64;

/// Identifier of a guest row.
pub type GuestId = i64;

// =============================================================================
// Settings
// =============================================================================

/// Hotel-wide booking settings.
///
/// Supplied by the caller for every evaluation and never modified by the
/// engine. Checked by [`crate::validation::validate_settings`] before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Fewest nights a stay may have.
    pub min_booking_length: u32,

    /// Most nights a stay may have.
    pub max_booking_length: u32,

    /// Most guests on a single booking, regardless of cabin.
    pub max_guests_per_booking: u32,

    /// Breakfast price per guest per night.
    pub breakfast_price: Money,

    /// Whether the booking form insists on observations.
    /// This is a data-entry preference, not a business rule.
    #[serde(default)]
    pub require_observations: bool,
}

// =============================================================================
// Stay Range
// =============================================================================

/// A half-open range of calendar days `[start, end)`.
///
/// `start` is the arrival day, `end` the departure day. The departure day is
/// not occupied, so a stay ending on the 3rd and one starting on the 3rd do
/// not collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StayRange {
    /// Booking rows call this `startDate`.
    #[ts(type = "string")]
    #[serde(alias = "startDate")]
    pub start: NaiveDate,
    #[ts(type = "string")]
    #[serde(alias = "endDate")]
    pub end: NaiveDate,
}

impl StayRange {
    /// Creates a range, rejecting one whose end is not after its start.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use oasis_core::StayRange;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
    /// assert!(StayRange::new(d(1), d(4)).is_ok());
    /// assert!(StayRange::new(d(4), d(4)).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if end <= start {
            return Err(CoreError::InvalidStayRange { start, end });
        }
        Ok(StayRange { start, end })
    }

    /// True if the range covers no day at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True if `date` is one of the occupied days.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// True if the two ranges share at least one occupied day.
    #[inline]
    pub fn intersects(&self, other: &StayRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }
}

// =============================================================================
// Cabin Snapshot
// =============================================================================

/// A cabin as fetched by the caller, with the stays that occupy it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CabinSnapshot {
    pub id: CabinId,

    #[serde(default)]
    pub name: String,

    /// Most guests the cabin sleeps.
    #[serde(alias = "capacity")]
    pub max_capacity: u32,

    /// Nightly price before discount.
    pub regular_price: Money,

    /// Flat amount taken off the nightly price.
    #[serde(default)]
    pub discount: Money,

    /// Stays that occupy the cabin.
    ///
    /// The caller supplies only occupancy-relevant stays (not cancelled, not
    /// checked out); see [`BookingStatus::occupies_cabin`]. The engine does
    /// not filter them.
    #[serde(default, alias = "bookings")]
    pub existing_stays: Vec<StayRange>,
}

impl CabinSnapshot {
    /// Nightly price after discount. May be zero or negative for a
    /// misconfigured cabin; `None` when the difference is not representable.
    #[inline]
    pub fn nightly_rate(&self) -> Option<Money> {
        self.regular_price.checked_sub(self.discount)
    }
}

// =============================================================================
// Reservation Draft
// =============================================================================

/// The booking form's current contents.
///
/// Every field is always present; a field the user has not filled in is
/// `None` (or `false` for checkboxes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationDraft {
    pub guest_id: Option<GuestId>,

    /// Signed so a negative entry from the form is reported as too few
    /// guests rather than failing to parse.
    #[serde(alias = "numGuests")]
    #[ts(type = "number | null")]
    pub guest_count: Option<i64>,

    #[ts(type = "string | null")]
    pub start_date: Option<NaiveDate>,

    #[ts(type = "string | null")]
    pub end_date: Option<NaiveDate>,

    #[serde(alias = "hasBreakfast")]
    pub wants_breakfast: bool,

    pub is_paid: bool,

    /// "Is the guest checking in?" checkbox.
    pub is_checking_in_now: bool,

    pub observations: Option<String>,
}

// =============================================================================
// Prices
// =============================================================================

/// Canonical price breakdown of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StayPrice {
    /// Nightly rate after discount × nights.
    #[serde(alias = "cabinPrice")]
    pub base_price: Money,

    /// Breakfast × nights × guests, or zero without breakfast.
    pub extras_price: Money,

    pub total_price: Money,
}

/// Live price shown while the booking form is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub nights: i64,
    pub base_price: Money,
    pub extras_price: Money,
    pub total_price: Money,
}

impl PriceQuote {
    pub fn new(nights: i64, price: StayPrice) -> Self {
        PriceQuote {
            nights,
            base_price: price.base_price,
            extras_price: price.extras_price,
            total_price: price.total_price,
        }
    }
}

// =============================================================================
// Admitted Reservation
// =============================================================================

/// A draft that passed every rule, ready for the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdmittedReservation {
    pub cabin_id: CabinId,
    pub guest_id: GuestId,
    #[serde(rename = "numGuests")]
    pub guest_count: u32,
    #[ts(type = "string")]
    pub start_date: NaiveDate,
    #[ts(type = "string")]
    pub end_date: NaiveDate,
    #[serde(rename = "hasBreakfast")]
    pub wants_breakfast: bool,
    pub is_paid: bool,
    pub observations: Option<String>,

    #[serde(rename = "numNights")]
    pub nights: i64,
    #[serde(rename = "cabinPrice")]
    pub base_price: Money,
    pub extras_price: Money,
    pub total_price: Money,
    pub status: BookingStatus,
}

impl AdmittedReservation {
    /// The occupied range of the new booking.
    pub fn stay(&self) -> StayRange {
        StayRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_stay_range_new_rejects_inverted() {
        assert!(StayRange::new(d(1), d(2)).is_ok());
        assert_eq!(
            StayRange::new(d(3), d(1)),
            Err(CoreError::InvalidStayRange {
                start: d(3),
                end: d(1)
            })
        );
    }

    #[test]
    fn test_stay_range_half_open() {
        let stay = StayRange { start: d(2), end: d(4) };
        assert!(!stay.contains(d(1)));
        assert!(stay.contains(d(2)));
        assert!(stay.contains(d(3)));
        assert!(!stay.contains(d(4)));

        // Back-to-back stays do not collide.
        let next = StayRange { start: d(4), end: d(6) };
        assert!(!stay.intersects(&next));
        assert!(stay.intersects(&StayRange { start: d(3), end: d(5) }));
    }

    #[test]
    fn test_nightly_rate() {
        let cabin = CabinSnapshot {
            id: 1,
            name: "001".to_string(),
            max_capacity: 2,
            regular_price: Money::from_major(250),
            discount: Money::from_major(25),
            existing_stays: vec![],
        };
        assert_eq!(cabin.nightly_rate(), Some(Money::from_major(225)));

        let extreme = CabinSnapshot {
            regular_price: Money::from_cents(i64::MAX),
            discount: Money::from_cents(-1),
            ..cabin
        };
        assert_eq!(extreme.nightly_rate(), None);
    }

    #[test]
    fn test_draft_deserializes_with_missing_fields() {
        let draft: ReservationDraft =
            serde_json::from_str(r#"{"numGuests": 2, "startDate": "2024-06-01"}"#).unwrap();
        assert_eq!(draft.guest_count, Some(2));
        assert_eq!(draft.start_date, Some(d(1)));
        assert_eq!(draft.end_date, None);
        assert!(!draft.is_paid);
    }

    #[test]
    fn test_cabin_accepts_api_field_names() {
        let cabin: CabinSnapshot = serde_json::from_str(
            r#"{
                "id": 7,
                "maxCapacity": 4,
                "regularPrice": 10000,
                "bookings": [
                    {"startDate": "2024-06-02", "endDate": "2024-06-03", "status": "unconfirmed"},
                    {"startDate": "2024-06-05", "endDate": "2024-06-09", "status": "checked-in"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cabin.discount, Money::zero());
        assert_eq!(
            cabin.existing_stays,
            vec![
                StayRange { start: d(2), end: d(3) },
                StayRange { start: d(5), end: d(9) },
            ]
        );
    }

    #[test]
    fn test_typescript_uses_canonical_names() {
        let draft = ReservationDraft::decl();
        assert!(draft.contains("guestCount: number | null"));
        assert!(draft.contains("wantsBreakfast: boolean"));
        assert!(!draft.contains("numGuests"));

        let range = StayRange::decl();
        assert!(range.contains("start: string"));
        assert!(!range.contains("startDate"));
    }
}
