//! Clock-free helpers for the `HH:MM` strings and ISO dates carried on
//! trip records. Every function here is total; callers decide what a
//! failed parse means for the record it came from.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Reads a `HH:MM` string as minutes since midnight. Returns `None` when
/// the value does not have exactly two numeric parts separated by a colon.
///
/// No range check is applied on purpose: `"25:99"` maps to 1599 the same
/// way the rest of the app has always read it, and the dispatch views only
/// ever compare these values against each other.
pub fn minutes_from_hhmm(raw: &str) -> Option<i64> {
    let mut parts = raw.trim().split(':');
    let (Some(hours), Some(minutes), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    let hours: i64 = hours.trim().parse().ok()?;
    let minutes: i64 = minutes.trim().parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Same as [`minutes_from_hhmm`] but malformed input collapses to `0`,
/// i.e. midnight, so absent and unreadable times sort together.
pub fn parse_time_to_minutes(raw: &str) -> i64 {
    minutes_from_hhmm(raw).unwrap_or(0)
}

/// Reads an ISO `YYYY-MM-DD` date. Anything else, including datetimes
/// with a time component, is rejected.
pub fn parse_trip_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Minutes since midnight for a wall-clock instant, on the same scale as
/// [`minutes_from_hhmm`].
pub fn minute_of_day(at: NaiveDateTime) -> i64 {
    i64::from(at.hour()) * 60 + i64::from(at.minute())
}
