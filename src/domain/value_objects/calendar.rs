//! Civil-calendar date/time primitives
//!
//! The core depends on a time-date primitive library rather than hand-rolling
//! calendar math; `chrono`'s proleptic-Gregorian `NaiveDate`/`NaiveTime`/
//! `NaiveDateTime` play that role here. `LocalDate`, `LocalTime` and
//! `LocalDateTime` are the vocabulary the rest of the engine uses; ordering is
//! lexicographic by construction (`NaiveDate`/`NaiveDateTime` already order
//! chronologically), and arithmetic routes through `chrono`'s internal
//! day-count representation, which is JDN-equivalent up to a fixed offset.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::weekday::Weekday;
use crate::domain::errors::ParseError;

/// A civil calendar date, no timezone attached.
pub type LocalDate = NaiveDate;
/// A civil clock time, no timezone attached.
pub type LocalTime = NaiveTime;
/// A civil date+time, no timezone attached.
pub type LocalDateTime = NaiveDateTime;

/// Julian Day Number of the proleptic-Gregorian epoch `chrono` counts from
/// (`0000-12-31`, day 0 of `num_days_from_ce`).
const JDN_OF_CE_EPOCH: i64 = 1_721_425;

/// Converts a date to its Julian Day Number.
pub fn julian_day_number(date: LocalDate) -> i64 {
    date.num_days_from_ce() as i64 + JDN_OF_CE_EPOCH
}

/// Number of days from `a` to `b` (negative if `b` precedes `a`).
pub fn days_between(a: LocalDate, b: LocalDate) -> i64 {
    julian_day_number(b) - julian_day_number(a)
}

/// `date` shifted by `n` days (may be negative).
pub fn add_days(date: LocalDate, n: i64) -> LocalDate {
    date + chrono::Duration::days(n)
}

/// The weekday of a date, in the canonical mon=0..sun=6 mapping.
pub fn weekday(date: LocalDate) -> Weekday {
    Weekday::from_chrono(date.weekday())
}

/// Whether `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1..=12) of `year`, or `None` if `month` is out
/// of range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    let first_of_this = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(days_between(first_of_this, first_of_next) as u32)
}

/// Number of days in `year`, summed over its twelve months.
pub fn days_in_year(year: i32) -> u32 {
    (1..=12u32).map(|m| days_in_month(year, m).unwrap_or(0)).sum()
}

/// Constructs a date, returning `None` when the day does not exist in the
/// given month (no clamping, no coercion — callers treat this as "skip").
pub fn make_date(year: i32, month: u32, day: u32) -> Option<LocalDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Combines a date with a time of day into a `LocalDateTime`.
pub fn make_date_time(date: LocalDate, time: LocalTime) -> LocalDateTime {
    date.and_time(time)
}

/// Midnight sentinel used for all-day instances.
pub fn midnight() -> LocalTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("00:00:00 is always valid")
}

/// Parses `YYYY-MM-DD` into a `LocalDate`.
pub fn parse_date(input: &str) -> Result<LocalDate, ParseError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ParseError::new("LocalDate", input))
}

/// Formats a `LocalDate` as `YYYY-MM-DD`.
pub fn format_date(date: LocalDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses `HH:MM:SS`, or `HH:MM` (canonicalized to `HH:MM:SS`), into a
/// `LocalTime`.
pub fn parse_time(input: &str) -> Result<LocalTime, ParseError> {
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|_| ParseError::new("LocalTime", input))
}

/// Formats a `LocalTime` as `HH:MM:SS`.
pub fn format_time(time: LocalTime) -> String {
    format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())
}

/// Parses `YYYY-MM-DDTHH:MM:SS` (or `YYYY-MM-DDTHH:MM`) into a
/// `LocalDateTime`.
pub fn parse_date_time(input: &str) -> Result<LocalDateTime, ParseError> {
    let (date_part, time_part) = input
        .split_once('T')
        .ok_or_else(|| ParseError::new("LocalDateTime", input))?;
    let date = parse_date(date_part).map_err(|_| ParseError::new("LocalDateTime", input))?;
    let time = parse_time(time_part).map_err(|_| ParseError::new("LocalDateTime", input))?;
    Ok(make_date_time(date, time))
}

/// Formats a `LocalDateTime` as `YYYY-MM-DDTHH:MM:SS`.
pub fn format_date_time(dt: LocalDateTime) -> String {
    format!("{}T{}", format_date(dt.date()), format_time(dt.time()))
}

/// Minutes between two date-times (`b - a`), truncated toward zero.
pub fn minutes_between(a: LocalDateTime, b: LocalDateTime) -> i64 {
    (b - a).num_minutes()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_date() -> impl Strategy<Value = LocalDate> {
        (1900i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| make_date(y, m, d).unwrap())
    }

    proptest! {
        #[test]
        fn add_days_then_subtract_is_identity(d in any_date(), n in -36500i64..36500) {
            prop_assert_eq!(add_days(add_days(d, n), -n), d);
        }

        #[test]
        fn days_between_is_antisymmetric(a in any_date(), b in any_date()) {
            prop_assert_eq!(days_between(a, b), -days_between(b, a));
        }

        #[test]
        fn julian_day_number_is_monotonic_with_add_days(d in any_date(), n in 0i64..10000) {
            prop_assert!(julian_day_number(add_days(d, n)) >= julian_day_number(d));
        }
    }
}
