//! # Dashboard Statistics
//!
//! Figures for the hotel dashboard, computed from the bookings of the
//! selected period.
//!
//! ## Dashboard Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Bookings │  Sales  │ Check-ins │ Occupancy                             │
//! │───────────┴─────────┴───────────┴───────────────────────────────────────│
//! │  Today                         │  Stay duration summary                 │
//! │  ├── arriving (unconfirmed)    │  1 night  ██████                       │
//! │  └── departing (checked-in)    │  2 nights ███                          │
//! │                                │  4-5 nights █                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales, occupancy and durations only count confirmed stays: bookings whose
//! guests actually arrived (checked in or checked out).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::status::BookingStatus;
use crate::types::CabinId;

/// What the dashboard needs to know about one stored booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaySummary {
    pub id: i64,
    #[serde(default)]
    pub cabin_id: Option<CabinId>,
    #[ts(type = "string")]
    pub start_date: NaiveDate,
    #[ts(type = "string")]
    pub end_date: NaiveDate,
    #[serde(rename = "numNights")]
    pub nights: i64,
    pub total_price: Money,
    #[serde(default)]
    pub status: BookingStatus,
}

impl StaySummary {
    /// True once the guests have arrived.
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self.status,
            BookingStatus::CheckedIn | BookingStatus::CheckedOut
        )
    }
}

fn confirmed(stays: &[StaySummary]) -> impl Iterator<Item = &StaySummary> {
    stays.iter().filter(|stay| stay.is_confirmed())
}

// =============================================================================
// Headline Figures
// =============================================================================

/// Sum of the total price of confirmed stays.
pub fn total_sales(stays: &[StaySummary]) -> Money {
    confirmed(stays)
        .map(|stay| stay.total_price)
        .fold(Money::zero(), |total, price| total.saturating_add(price))
}

/// Share of available cabin-nights that were occupied, in `0.0..=1.0` for
/// consistent input.
///
/// ## Example
/// ```text
/// 8 cabins × 30 days = 240 cabin-nights
/// 60 nights occupied  → 0.25
/// ```
///
/// Returns `0.0` when there are no cabins or no days.
pub fn occupancy_rate(stays: &[StaySummary], cabin_count: u32, num_days: u32) -> f64 {
    let available = u64::from(cabin_count) * u64::from(num_days);
    if available == 0 {
        return 0.0;
    }
    let occupied = confirmed(stays)
        .map(|stay| stay.nights.max(0))
        .fold(0_i64, i64::saturating_add);
    occupied as f64 / available as f64
}

// =============================================================================
// Stay Durations
// =============================================================================

/// Length bands of the stay duration chart.
///
/// The last band starts at 22 nights, so a 21-night stay is counted once,
/// under `15-21 nights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DurationBucket {
    #[serde(rename = "1 night")]
    One,
    #[serde(rename = "2 nights")]
    Two,
    #[serde(rename = "3 nights")]
    Three,
    #[serde(rename = "4-5 nights")]
    FourToFive,
    #[serde(rename = "6-7 nights")]
    SixToSeven,
    #[serde(rename = "8-14 nights")]
    EightToFourteen,
    #[serde(rename = "15-21 nights")]
    FifteenToTwentyOne,
    #[serde(rename = "22+ nights")]
    TwentyTwoPlus,
}

impl DurationBucket {
    /// Chart order.
    pub const ALL: [DurationBucket; 8] = [
        DurationBucket::One,
        DurationBucket::Two,
        DurationBucket::Three,
        DurationBucket::FourToFive,
        DurationBucket::SixToSeven,
        DurationBucket::EightToFourteen,
        DurationBucket::FifteenToTwentyOne,
        DurationBucket::TwentyTwoPlus,
    ];

    /// Band holding a stay of `nights`. Stays under one night have none.
    pub fn for_nights(nights: i64) -> Option<Self> {
        let bucket = match nights {
            i64::MIN..=0 => return None,
            1 => DurationBucket::One,
            2 => DurationBucket::Two,
            3 => DurationBucket::Three,
            4..=5 => DurationBucket::FourToFive,
            6..=7 => DurationBucket::SixToSeven,
            8..=14 => DurationBucket::EightToFourteen,
            15..=21 => DurationBucket::FifteenToTwentyOne,
            _ => DurationBucket::TwentyTwoPlus,
        };
        Some(bucket)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            DurationBucket::One => "1 night",
            DurationBucket::Two => "2 nights",
            DurationBucket::Three => "3 nights",
            DurationBucket::FourToFive => "4-5 nights",
            DurationBucket::SixToSeven => "6-7 nights",
            DurationBucket::EightToFourteen => "8-14 nights",
            DurationBucket::FifteenToTwentyOne => "15-21 nights",
            DurationBucket::TwentyTwoPlus => "22+ nights",
        }
    }
}

/// One slice of the duration chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DurationCount {
    pub duration: DurationBucket,
    pub value: u32,
}

/// Confirmed stays counted per duration band, in chart order.
///
/// Bands with no stays are left out.
pub fn duration_breakdown(stays: &[StaySummary]) -> Vec<DurationCount> {
    let mut counts = [0u32; DurationBucket::ALL.len()];
    for bucket in confirmed(stays).filter_map(|stay| DurationBucket::for_nights(stay.nights)) {
        counts[bucket as usize] += 1;
    }

    DurationBucket::ALL
        .iter()
        .zip(counts)
        .filter(|(_, value)| *value > 0)
        .map(|(&duration, value)| DurationCount { duration, value })
        .collect()
}

// =============================================================================
// Today
// =============================================================================

/// Guests expected at the front desk today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TodaysActivity {
    /// Unconfirmed bookings starting today.
    pub arrivals: Vec<StaySummary>,
    /// Checked-in bookings ending today.
    pub departures: Vec<StaySummary>,
}

pub fn todays_activity(stays: &[StaySummary], today: NaiveDate) -> TodaysActivity {
    let mut activity = TodaysActivity::default();
    for stay in stays {
        match stay.status {
            BookingStatus::Unconfirmed if stay.start_date == today => {
                activity.arrivals.push(stay.clone());
            }
            BookingStatus::CheckedIn if stay.end_date == today => {
                activity.departures.push(stay.clone());
            }
            _ => {}
        }
    }
    activity
}

// =============================================================================
// Dashboard
// =============================================================================

/// Everything the dashboard shows for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Bookings made in the period, whatever their status.
    pub num_bookings: usize,
    pub sales: Money,
    /// Confirmed stays in the period.
    pub check_ins: usize,
    pub occupancy_rate: f64,
    pub durations: Vec<DurationCount>,
    pub today: TodaysActivity,
}

/// Computes every dashboard figure at once.
pub fn dashboard(
    stays: &[StaySummary],
    cabin_count: u32,
    num_days: u32,
    today: NaiveDate,
) -> DashboardStats {
    DashboardStats {
        num_bookings: stays.len(),
        sales: total_sales(stays),
        check_ins: confirmed(stays).count(),
        occupancy_rate: occupancy_rate(stays, cabin_count, num_days),
        durations: duration_breakdown(stays),
        today: todays_activity(stays, today),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
