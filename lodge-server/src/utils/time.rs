//! Day and month boundary computation
//!
//! All boundary math takes an explicit `now` so report windows are
//! testable with a pinned clock. Repositories only ever see `i64` Unix
//! millis; conversion happens at the handler layer.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Half-open [start, end) window in Unix millis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MillisRange {
    pub start: i64,
    pub end: i64,
}

fn date_start_millis(date: NaiveDate) -> i64 {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .timestamp_millis()
}

/// The UTC calendar day containing `now`, as [day start, next day start)
pub fn day_bounds(now: DateTime<Utc>) -> MillisRange {
    let today = now.date_naive();
    let tomorrow = today.succ_opt().unwrap_or(today);
    MillisRange {
        start: date_start_millis(today),
        end: date_start_millis(tomorrow),
    }
}

/// The UTC calendar month containing `now`, as [month start, next month start)
pub fn month_bounds(now: DateTime<Utc>) -> MillisRange {
    let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap();
    let next = if now.month() == 12 {
        NaiveDate::from_ymd_opt(now.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(now.year(), now.month() + 1, 1).unwrap()
    };
    MillisRange {
        start: date_start_millis(first),
        end: date_start_millis(next),
    }
}
