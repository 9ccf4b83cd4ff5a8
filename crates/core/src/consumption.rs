//! Consumption aggregation math.
//!
//! Pure functions behind the consumption analytics: splitting a date
//! range into granularity buckets, normalizing totals to
//! liters-per-day-per-person, and computing percent deviation against a
//! trailing baseline period.
//!
//! All ranges are half-open `[start, end)` over UTC timestamps.

use chrono::{Duration, Months};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Time-bucket size for granularity-bucketed consumption queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }

    /// The start of the bucket following one that starts at `from`.
    ///
    /// Hour/day/week buckets have fixed width; month buckets step by
    /// calendar month so a range starting on the 15th produces
    /// 15th-to-15th buckets.
    pub fn advance(&self, from: Timestamp) -> Timestamp {
        match self {
            Granularity::Hour => from + Duration::hours(1),
            Granularity::Day => from + Duration::days(1),
            Granularity::Week => from + Duration::weeks(1),
            Granularity::Month => from + Months::new(1),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split `[start, end)` into ordered, non-overlapping, contiguous buckets.
///
/// Buckets step from `start` (not from calendar boundaries), so the
/// first bucket always begins exactly at `start`. The final bucket is
/// clipped at `end`, which keeps the union of all buckets equal to the
/// queried range. An empty or inverted range yields no buckets.
pub fn bucket_ranges(
    start: Timestamp,
    end: Timestamp,
    granularity: Granularity,
) -> Vec<(Timestamp, Timestamp)> {
    let mut buckets = Vec::new();
    let mut cursor = start;
    while cursor < end {
        let next = granularity.advance(cursor);
        buckets.push((cursor, next.min(end)));
        cursor = next;
    }
    buckets
}

/// Percent deviation of `current` against `baseline`, floored at -100.
///
/// A zero (or negative) baseline yields 0% deviation by convention:
/// with no reference consumption there is nothing meaningful to deviate
/// from, and this avoids dividing by zero for households with no history.
pub fn percent_deviation(current: f64, baseline: f64) -> f64 {
    if baseline <= 0.0 {
        return 0.0;
    }
    ((current - baseline) / baseline * 100.0).max(-100.0)
}

/// Normalize a period total to liters per day per person.
///
/// Divides by the range length in (fractional) days times the resident
/// count. Degenerate inputs (empty range, zero residents) yield 0.
pub fn liters_per_day_per_person(
    total_liters: f64,
    start: Timestamp,
    end: Timestamp,
    residents: i32,
) -> f64 {
    let days = (end - start).num_seconds() as f64 / 86_400.0;
    if days <= 0.0 || residents <= 0 {
        return 0.0;
    }
    total_liters / (days * f64::from(residents))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn ts(y: i32, mo: u32, d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn day_buckets_cover_the_range_contiguously() {
        let start = ts(2025, 3, 1, 0);
        let end = ts(2025, 3, 8, 0);
        let buckets = bucket_ranges(start, end, Granularity::Day);

        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].0, start);
        assert_eq!(buckets[6].1, end);
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].1, pair[1].0, "buckets must be contiguous");
            assert!(pair[0].0 < pair[1].0, "buckets must ascend");
        }
    }

    #[test]
    fn final_bucket_is_clipped_at_range_end() {
        // 2.5 days at day granularity: the third bucket is a half day.
        let start = ts(2025, 3, 1, 0);
        let end = ts(2025, 3, 3, 12);
        let buckets = bucket_ranges(start, end, Granularity::Day);

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[2], (ts(2025, 3, 3, 0), end));
    }

    #[test]
    fn month_buckets_step_by_calendar_month() {
        // Start mid-month: buckets run 15th to 15th, with varying widths.
        let start = ts(2025, 1, 15, 0);
        let end = ts(2025, 4, 15, 0);
        let buckets = bucket_ranges(start, end, Granularity::Month);

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0], (ts(2025, 1, 15, 0), ts(2025, 2, 15, 0)));
        assert_eq!(buckets[1], (ts(2025, 2, 15, 0), ts(2025, 3, 15, 0)));
        assert_eq!(buckets[2], (ts(2025, 3, 15, 0), ts(2025, 4, 15, 0)));
    }

    #[test]
    fn hour_buckets_for_one_day() {
        let buckets = bucket_ranges(ts(2025, 6, 1, 0), ts(2025, 6, 2, 0), Granularity::Hour);
        assert_eq!(buckets.len(), 24);
    }

    #[test]
    fn empty_or_inverted_range_yields_no_buckets() {
        let t = ts(2025, 6, 1, 0);
        assert!(bucket_ranges(t, t, Granularity::Day).is_empty());
        assert!(bucket_ranges(t, ts(2025, 5, 1, 0), Granularity::Day).is_empty());
    }

    #[test]
    fn deviation_against_zero_baseline_is_zero() {
        assert_eq!(percent_deviation(42.0, 0.0), 0.0);
        assert_eq!(percent_deviation(0.0, 0.0), 0.0);
    }

    #[test]
    fn deviation_is_floored_at_minus_100() {
        assert_eq!(percent_deviation(0.0, 80.0), -100.0);
    }

    #[test]
    fn deviation_basic_percentages() {
        assert_eq!(percent_deviation(120.0, 100.0), 20.0);
        assert_eq!(percent_deviation(50.0, 100.0), -50.0);
        assert_eq!(percent_deviation(100.0, 100.0), 0.0);
    }

    #[test]
    fn per_day_per_person_divides_by_days_and_residents() {
        // 80 L over 2 days in a 4-person household: 10 L/day/person.
        let start = ts(2025, 3, 1, 0);
        let end = ts(2025, 3, 3, 0);
        let value = liters_per_day_per_person(80.0, start, end, 4);
        assert!((value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn per_day_per_person_degenerate_inputs_yield_zero() {
        let t = ts(2025, 3, 1, 0);
        assert_eq!(liters_per_day_per_person(80.0, t, t, 4), 0.0);
        assert_eq!(liters_per_day_per_person(80.0, t, ts(2025, 3, 2, 0), 0), 0.0);
    }
}
