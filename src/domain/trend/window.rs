//! Analysis windows: the current span of days and the span preceding it

use crate::domain::day_bucket::start_of_day;
use crate::error::{MindmateError, Result};
use chrono::{DateTime, Duration, Utc};

/// A closed time range `[start, end]` bucketed into `days` whole UTC days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Start of the UTC day holding bucket 0
    pub start: DateTime<Utc>,
    /// Inclusive upper bound
    pub end: DateTime<Utc>,
    pub days: usize,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, days: usize) -> Self {
        TimeWindow {
            start: start_of_day(start),
            end,
            days,
        }
    }

    /// Inclusive on both ends
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

/// The current window and the comparison window immediately before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindows {
    pub current: TimeWindow,
    pub prev: TimeWindow,
}

impl AnalysisWindows {
    /// Lay out both windows relative to `now`
    ///
    /// The current window covers the `window_days` UTC days ending with the day of
    /// `now` and is closed at `now`. The comparison window covers the `compare_days`
    /// days before it and ends one second before the current window starts.
    /// Fails when a window reaches outside the representable date range.
    pub fn at(now: DateTime<Utc>, window_days: u32, compare_days: u32) -> Result<Self> {
        let days_before = |t: DateTime<Utc>, days: u32| {
            Duration::try_days(i64::from(days)).and_then(|d| t.checked_sub_signed(d))
        };
        let out_of_range = || {
            MindmateError::InvalidWindow(format!(
                "{} + {} days before {} is out of range",
                window_days, compare_days, now
            ))
        };

        let window_start =
            days_before(start_of_day(now), window_days.saturating_sub(1)).ok_or_else(out_of_range)?;
        let compare_start = days_before(window_start, compare_days).ok_or_else(out_of_range)?;
        let prev_end = window_start
            .checked_sub_signed(Duration::seconds(1))
            .ok_or_else(out_of_range)?;

        Ok(AnalysisWindows {
            current: TimeWindow::new(window_start, now, window_days as usize),
            prev: TimeWindow::new(compare_start, prev_end, compare_days as usize),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 17, 15, 45, 10).unwrap()
    }

    #[test]
    fn test_default_week_layout() {
        let windows = AnalysisWindows::at(now(), 7, 7).unwrap();

        assert_eq!(
            windows.current.start,
            Utc.with_ymd_and_hms(2025, 1, 11, 0, 0, 0).unwrap()
        );
        assert_eq!(windows.current.end, now());
        assert_eq!(windows.current.days, 7);

        assert_eq!(
            windows.prev.start,
            Utc.with_ymd_and_hms(2025, 1, 4, 0, 0, 0).unwrap()
        );
        assert_eq!(
            windows.prev.end,
            Utc.with_ymd_and_hms(2025, 1, 10, 23, 59, 59).unwrap()
        );
        assert_eq!(windows.prev.days, 7);
    }

    #[test]
    fn test_single_day_window_is_today() {
        let windows = AnalysisWindows::at(now(), 1, 1).unwrap();
        assert_eq!(
            windows.current.start,
            Utc.with_ymd_and_hms(2025, 1, 17, 0, 0, 0).unwrap()
        );
        assert_eq!(
            windows.prev.start,
            Utc.with_ymd_and_hms(2025, 1, 16, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_windows_never_overlap() {
        for window_days in 1..=10 {
            for compare_days in 0..=10 {
                let windows = AnalysisWindows::at(now(), window_days, compare_days).unwrap();
                assert!(windows.prev.end < windows.current.start);
                assert!(!windows.prev.contains(windows.current.start));
                assert!(!windows.current.contains(windows.prev.end));
            }
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let windows = AnalysisWindows::at(now(), 3, 3).unwrap();
        assert!(windows.current.contains(windows.current.start));
        assert!(windows.current.contains(now()));
        assert!(!windows.current.contains(now() + Duration::seconds(1)));
        assert!(windows.prev.contains(windows.prev.end));
    }

    #[test]
    fn test_huge_window_is_an_error() {
        assert!(matches!(
            AnalysisWindows::at(now(), u32::MAX, 7),
            Err(MindmateError::InvalidWindow(_))
        ));
        assert!(AnalysisWindows::at(now(), 7, u32::MAX).is_err());
    }
}
