use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::date;

/// Fraction of the range `start..end` that has elapsed at `now`, in `[0, 1]`.
///
/// Empty and inverted ranges have no progress.
pub fn progress(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let total = (end - start).num_milliseconds();
    if total <= 0 {
        return 0.0;
    }

    let clamped_now = now.clamp(start, end);
    let elapsed = (clamped_now - start).num_milliseconds();

    (elapsed as f64 / total as f64).clamp(0.0, 1.0)
}

/// A date range ready for display: both bounds as labels plus the completion fraction.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeSummary {
    pub start_label: String,
    pub end_label: String,
    pub completion: f64,
}

impl TimeSummary {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            start_label: date::label(&start),
            end_label: date::label(&end),
            completion: progress(start, end, now),
        }
    }

    /// Completion as a whole percentage.
    pub fn percent(&self) -> u8 {
        (self.completion * 100.0).round() as u8
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn range() -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc.with_ymd_and_hms(2025, 9, 21, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 9, 21, 0, 0, 0).unwrap();

        (start, end)
    }

    #[test]
    fn before_the_start_is_zero() {
        let (start, end) = range();

        assert_eq!(0.0, progress(start, end, start - Duration::days(10)));
        assert_eq!(0.0, progress(start, end, start));
    }

    #[test]
    fn after_the_end_is_one() {
        let (start, end) = range();

        assert_eq!(1.0, progress(start, end, end + Duration::days(10)));
        assert_eq!(1.0, progress(start, end, end));
    }

    #[test]
    fn halfway_is_one_half() {
        let (start, end) = range();
        let now = start + (end - start) / 2;

        assert!((progress(start, end, now) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_ranges_are_zero() {
        let (start, end) = range();

        for now in [start - Duration::days(1), start, end] {
            assert_eq!(0.0, progress(start, start, now));
            assert_eq!(0.0, progress(end, start, now));
        }
    }

    #[test]
    fn summarizes_labels_and_percent() {
        let (start, end) = range();
        let summary = TimeSummary::new(start, end, start + Duration::days(73));

        assert_eq!("Sep 21, 2025", summary.start_label);
        assert_eq!("Sep 21, 2026", summary.end_label);
        assert_eq!(20, summary.percent());
    }
}
