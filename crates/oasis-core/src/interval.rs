//! # Interval Set
//!
//! The days already taken in one cabin.
//!
//! ## Day Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Each stay occupies [start, end): arrival day in, departure day out.    │
//! │                                                                         │
//! │   June      1    2    3    4    5    6                                  │
//! │   booked         ████████                 stay 2 → 4 (nights 2, 3)      │
//! │   request   ██████████████                1 → 4   overlaps (2, 3)       │
//! │   request                  █████████      4 → 6   free (back-to-back)   │
//! │   request   █████                         1 → 2   free                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stored ranges are sorted and coalesced on build, so both queries are a
//! binary search.

use chrono::NaiveDate;

use crate::types::StayRange;

/// Occupied days of a cabin, as sorted non-touching ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalSet {
    ranges: Vec<StayRange>,
}

impl IntervalSet {
    /// Builds the set from a cabin's existing stays.
    ///
    /// Ranges that cover no day (`start >= end`) are dropped. Overlapping
    /// and touching ranges are merged, which leaves the occupied day set
    /// unchanged.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use oasis_core::{IntervalSet, StayRange};
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
    /// let set = IntervalSet::build(&[
    ///     StayRange { start: d(2), end: d(4) },
    ///     StayRange { start: d(4), end: d(6) },
    /// ]);
    /// assert_eq!(set.ranges(), &[StayRange { start: d(2), end: d(6) }]);
    /// ```
    pub fn build(existing_stays: &[StayRange]) -> Self {
        let mut sorted: Vec<StayRange> = existing_stays
            .iter()
            .filter(|stay| !stay.is_empty())
            .copied()
            .collect();
        sorted.sort_unstable();

        let mut ranges: Vec<StayRange> = Vec::with_capacity(sorted.len());
        for stay in sorted {
            match ranges.last_mut() {
                Some(last) if stay.start <= last.end => {
                    if stay.end > last.end {
                        last.end = stay.end;
                    }
                }
                _ => ranges.push(stay),
            }
        }

        IntervalSet { ranges }
    }

    /// True if `range` shares at least one occupied day with the set.
    ///
    /// An empty `range` shares nothing.
    pub fn overlaps(&self, range: &StayRange) -> bool {
        if range.is_empty() {
            return false;
        }
        // First stored range still occupied on or after the requested start.
        let idx = self.ranges.partition_point(|r| r.end <= range.start);
        self.ranges
            .get(idx)
            .is_some_and(|r| r.start < range.end)
    }

    /// True if `date` is an occupied day.
    ///
    /// Drives the disabled days of the booking form's date picker.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= date);
        self.ranges.get(idx).is_some_and(|r| r.start <= date)
    }

    /// The coalesced ranges, earliest first.
    pub fn ranges(&self) -> &[StayRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn into_ranges(self) -> Vec<StayRange> {
        self.ranges
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

    fn r(start: u32, end: u32) -> StayRange {
        StayRange {
            start: d(start),
            end: d(end),
        }
    }

    #[test]
    fn test_empty_set_overlaps_nothing() {
        let set = IntervalSet::build(&[]);
        assert!(set.is_empty());
        assert!(!set.overlaps(&r(1, 30)));
        assert!(!set.covers_date(d(1)));
    }

    #[test]
    fn test_overlap_inside_and_spanning() {
        let set = IntervalSet::build(&[r(2, 3)]);
        assert!(set.overlaps(&r(1, 4)));
        assert!(set.overlaps(&r(2, 3)));
        assert!(set.overlaps(&r(2, 10)));
        assert!(set.overlaps(&r(1, 3)));
    }

    #[test]
    fn test_boundaries_are_half_open() {
        let set = IntervalSet::build(&[r(10, 15)]);
        // Leaving on the arrival day of the existing stay.
        assert!(!set.overlaps(&r(5, 10)));
        // Arriving on the departure day of the existing stay.
        assert!(!set.overlaps(&r(15, 20)));
        // Leaving one day into the existing stay.
        assert!(set.overlaps(&r(5, 11)));
        // Arriving on the last occupied night.
        assert!(set.overlaps(&r(14, 20)));
    }

    #[test]
    fn test_covers_date() {
        let set = IntervalSet::build(&[r(2, 4), r(10, 12)]);
        assert!(!set.covers_date(d(1)));
        assert!(set.covers_date(d(2)));
        assert!(set.covers_date(d(3)));
        assert!(!set.covers_date(d(4)));
        assert!(!set.covers_date(d(9)));
        assert!(set.covers_date(d(11)));
        assert!(!set.covers_date(d(12)));
    }

    #[test]
    fn test_build_sorts_merges_and_drops_empty() {
        let set = IntervalSet::build(&[r(10, 12), r(2, 5), r(3, 4), r(7, 7), r(5, 6), r(20, 18)]);
        assert_eq!(set.ranges(), &[r(2, 6), r(10, 12)]);
    }

    #[test]
    fn test_gap_between_stays_is_free() {
        let set = IntervalSet::build(&[r(2, 4), r(8, 10)]);
        assert!(!set.overlaps(&r(4, 8)));
        assert!(set.overlaps(&r(4, 9)));
        assert!(set.overlaps(&r(3, 8)));
    }

    #[test]
    fn test_overlap_matches_pairwise_check() {
        let stays = [r(3, 5), r(9, 12), r(12, 14), r(20, 21)];
        let set = IntervalSet::build(&stays);
        for start in 1..25 {
            for end in (start + 1)..26 {
                let request = r(start, end);
                let expected = stays.iter().any(|s| s.intersects(&request));
                assert_eq!(set.overlaps(&request), expected, "{start}..{end}");
            }
        }
    }
}
