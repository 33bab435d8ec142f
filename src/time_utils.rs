// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and calendar days.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current timestamp as RFC3339.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Calendar day containing `instant`, for days that start at UTC+`offset_minutes`.
///
/// Offsets outside chrono's accepted range fall back to UTC.
pub fn calendar_day(instant: DateTime<Utc>, offset_minutes: i32) -> NaiveDate {
    match FixedOffset::east_opt(offset_minutes * 60) {
        Some(offset) => instant.with_timezone(&offset).date_naive(),
        None => instant.date_naive(),
    }
}

/// Today's calendar day.
pub fn today(offset_minutes: i32) -> NaiveDate {
    calendar_day(Utc::now(), offset_minutes)
}

/// Whether `earlier` is exactly the day before `later`.
pub fn is_previous_day(earlier: NaiveDate, later: NaiveDate) -> bool {
    later - earlier == Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_calendar_day_respects_offset() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 3, 30, 0).unwrap();

        assert_eq!(
            calendar_day(instant, 0),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        // 03:30 UTC is still the previous evening at UTC-7
        assert_eq!(
            calendar_day(instant, -7 * 60),
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()
        );
    }

    #[test]
    fn test_is_previous_day_across_month_boundary() {
        let may_31 = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        let jun_1 = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        assert!(is_previous_day(may_31, jun_1));
        assert!(!is_previous_day(jun_1, may_31));
        assert!(!is_previous_day(jun_1, jun_1));
    }
}
