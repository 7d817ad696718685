//! Time windows used by reports.
//!
//! Every bound is a UTC instant, the same timezone timestamps are stored in.
//! `from` is inclusive and `to` is exclusive (`[from, to)`).

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

/// Days before today included by [`TimeWindow::trailing_week`].
pub const WEEK_LOOKBACK_DAYS: i64 = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

fn start_of(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

impl TimeWindow {
    /// The whole ledger history.
    pub fn all() -> Self {
        Self::default()
    }

    /// The UTC calendar day containing `now`.
    pub fn day(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let from = start_of(today);
        Self {
            from: Some(from),
            to: Some(from + Duration::days(1)),
        }
    }

    /// Today plus the previous seven calendar days.
    pub fn trailing_week(now: DateTime<Utc>) -> Self {
        let first_day = now.date_naive() - Duration::days(WEEK_LOOKBACK_DAYS);
        Self {
            from: Some(start_of(first_day)),
            to: None,
        }
    }

    /// From the first instant of the calendar month containing `now`.
    pub fn month_to_date(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let first_day = today.with_day(1).unwrap_or(today);
        Self {
            from: Some(start_of(first_day)),
            to: None,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at < to)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn day_covers_the_utc_date_only() {
        let window = TimeWindow::day(at(2025, 3, 10, 15, 30));
        assert!(window.contains(at(2025, 3, 10, 0, 0)));
        assert!(window.contains(at(2025, 3, 10, 23, 59)));
        assert!(!window.contains(at(2025, 3, 9, 23, 59)));
        assert!(!window.contains(at(2025, 3, 11, 0, 0)));
    }

    #[test]
    fn trailing_week_starts_seven_days_back_at_midnight() {
        let window = TimeWindow::trailing_week(at(2025, 3, 10, 9, 0));
        assert_eq!(window.from, Some(at(2025, 3, 3, 0, 0)));
        assert!(window.contains(at(2025, 3, 3, 0, 0)));
        assert!(!window.contains(at(2025, 3, 2, 23, 59)));
        assert!(window.contains(at(2025, 3, 10, 23, 0)));
    }

    #[test]
    fn month_to_date_starts_on_the_first() {
        let window = TimeWindow::month_to_date(at(2025, 2, 28, 12, 0));
        assert_eq!(window.from, Some(at(2025, 2, 1, 0, 0)));
        assert!(!window.contains(at(2025, 1, 31, 23, 59)));
    }

    #[test]
    fn all_contains_everything() {
        assert!(TimeWindow::all().contains(at(1999, 1, 1, 0, 0)));
    }
}
