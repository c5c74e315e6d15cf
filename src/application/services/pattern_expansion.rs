//! Pattern expansion (§4.B) — the first of the three hard subsystems
//!
//! A pure function from `(pattern, date range, series start)` to an ordered
//! set of dates. No I/O, no adapter dependency; every invariant in §4.B and
//! §8 ("Pattern idempotence", "Range monotonicity") is testable directly
//! against this module.

use std::collections::BTreeSet;

use crate::domain::entities::Pattern;
use crate::domain::errors::CoreError;
use crate::domain::value_objects::calendar::{add_days, days_between, days_in_month, make_date, weekday};
use crate::domain::value_objects::{LocalDate, Weekday};

/// An inclusive date range, `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: LocalDate,
    pub end: LocalDate,
}

impl DateRange {
    pub fn new(start: LocalDate, end: LocalDate) -> Result<DateRange, CoreError> {
        if start > end {
            return Err(CoreError::InvalidRangeError(format!(
                "range start {start} is after range end {end}"
            )));
        }
        Ok(DateRange { start, end })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExpandOptions {
    /// Keep only the earliest `count` dates, when set.
    pub count: Option<usize>,
}

/// Expands `pattern` over `range`, anchored on `series_start`.
///
/// Every returned date satisfies
/// `max(range.start, series_start) <= d <= range.end` and the pattern's own
/// predicate; the result is deterministic and contains no duplicates.
pub fn expand_pattern(
    pattern: &Pattern,
    range: DateRange,
    series_start: LocalDate,
    options: ExpandOptions,
) -> BTreeSet<LocalDate> {
    let lower = range.start.max(series_start);
    let dates = if lower > range.end {
        BTreeSet::new()
    } else {
        expand_inner(pattern, range, lower, series_start)
    };

    match options.count {
        Some(k) => dates.into_iter().take(k).collect(),
        None => dates,
    }
}

fn expand_inner(
    pattern: &Pattern,
    range: DateRange,
    lower: LocalDate,
    series_start: LocalDate,
) -> BTreeSet<LocalDate> {
    match pattern {
        Pattern::Daily => date_run(lower, range.end),

        Pattern::EveryNDays { n } => {
            let n = i64::from(*n);
            date_run(lower, range.end)
                .into_iter()
                .filter(|&d| d >= series_start && days_between(series_start, d).rem_euclid(n) == 0)
                .collect()
        }

        Pattern::Weekly { days_of_week: None } => {
            let w = weekday(series_start);
            expand_inner(&Pattern::EveryNWeeks { n: 1, weekday: Some(w) }, range, lower, series_start)
        }
        Pattern::Weekly { days_of_week: Some(days) } => {
            weekday_members(lower, range.end, days)
        }

        Pattern::EveryNWeeks { n, weekday: w } => {
            let w = w.unwrap_or_else(|| weekday(series_start));
            let anchor = first_date_on_or_after(series_start, w);
            let step = 7 * i64::from(*n);
            date_run(lower, range.end)
                .into_iter()
                .filter(|&d| d >= anchor && days_between(anchor, d).rem_euclid(step) == 0)
                .collect()
        }

        Pattern::Monthly { day } => months_overlapping(lower, range.end)
            .filter_map(|(y, m)| make_date(y, m, *day))
            .filter(|&d| lower <= d && d <= range.end)
            .collect(),

        Pattern::LastDayOfMonth => months_overlapping(lower, range.end)
            .filter_map(|(y, m)| last_day_of_month(y, m))
            .filter(|&d| lower <= d && d <= range.end)
            .collect(),

        Pattern::Yearly { month, day } => years_overlapping(lower, range.end)
            .filter_map(|y| make_date(y, *month, *day))
            .filter(|&d| lower <= d && d <= range.end)
            .collect(),

        Pattern::Weekdays { days } => weekday_members(lower, range.end, days),

        Pattern::NthWeekdayOfMonth { n, weekday: w } => months_overlapping(lower, range.end)
            .filter_map(|(y, m)| nth_weekday_of_month(y, m, *n, *w))
            .filter(|&d| lower <= d && d <= range.end)
            .collect(),

        Pattern::LastWeekdayOfMonth { weekday: w } => months_overlapping(lower, range.end)
            .map(|(y, m)| last_weekday_of_month(y, m, *w))
            .filter(|&d| lower <= d && d <= range.end)
            .collect(),

        Pattern::NthToLastWeekdayOfMonth { n, weekday: w } => months_overlapping(lower, range.end)
            .filter_map(|(y, m)| nth_to_last_weekday_of_month(y, m, *n, *w))
            .filter(|&d| lower <= d && d <= range.end)
            .collect(),

        Pattern::Union { patterns } => {
            let mut out = BTreeSet::new();
            for p in patterns {
                out.extend(expand_inner(p, range, lower, series_start));
            }
            out
        }

        Pattern::Except { base, exceptions } => {
            let mut out = expand_inner(base, range, lower, series_start);
            for p in exceptions {
                for d in expand_inner(p, range, lower, series_start) {
                    out.remove(&d);
                }
            }
            out
        }
    }
}

fn date_run(start: LocalDate, end: LocalDate) -> BTreeSet<LocalDate> {
    let mut out = BTreeSet::new();
    let mut d = start;
    while d <= end {
        out.insert(d);
        d = add_days(d, 1);
    }
    out
}

fn weekday_members(start: LocalDate, end: LocalDate, days: &std::collections::BTreeSet<Weekday>) -> BTreeSet<LocalDate> {
    date_run(start, end).into_iter().filter(|&d| days.contains(&weekday(d))).collect()
}

fn first_date_on_or_after(from: LocalDate, w: Weekday) -> LocalDate {
    let shift = (i64::from(w.index()) - i64::from(weekday(from).index())).rem_euclid(7);
    add_days(from, shift)
}

fn months_overlapping(start: LocalDate, end: LocalDate) -> impl Iterator<Item = (i32, u32)> {
    use chrono::Datelike;
    let (mut y, mut m) = (start.year(), start.month());
    let (end_y, end_m) = (end.year(), end.month());
    std::iter::from_fn(move || {
        if y > end_y || (y == end_y && m > end_m) {
            return None;
        }
        let out = (y, m);
        if m == 12 {
            y += 1;
            m = 1;
        } else {
            m += 1;
        }
        Some(out)
    })
}

fn years_overlapping(start: LocalDate, end: LocalDate) -> impl Iterator<Item = i32> {
    use chrono::Datelike;
    start.year()..=end.year()
}

fn last_day_of_month(year: i32, month: u32) -> Option<LocalDate> {
    let days = days_in_month(year, month)?;
    make_date(year, month, days)
}

fn first_weekday_of_month(year: i32, month: u32, w: Weekday) -> LocalDate {
    let first = make_date(year, month, 1).expect("day 1 always exists");
    first_date_on_or_after(first, w)
}

fn last_weekday_of_month(year: i32, month: u32, w: Weekday) -> LocalDate {
    let last = last_day_of_month(year, month).expect("last day of month always exists");
    let shift = (i64::from(weekday(last).index()) - i64::from(w.index())).rem_euclid(7);
    add_days(last, -shift)
}

fn nth_weekday_of_month(year: i32, month: u32, n: i64, w: Weekday) -> Option<LocalDate> {
    use chrono::Datelike;
    let candidate = add_days(first_weekday_of_month(year, month, w), (n - 1) * 7);
    (candidate.year() == year && candidate.month() == month).then_some(candidate)
}

fn nth_to_last_weekday_of_month(year: i32, month: u32, n: i64, w: Weekday) -> Option<LocalDate> {
    use chrono::Datelike;
    let candidate = add_days(last_weekday_of_month(year, month, w), -(n - 1) * 7);
    (candidate.year() == year && candidate.month() == month).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::calendar::make_date;

    fn d(y: i32, m: u32, day: u32) -> LocalDate {
        make_date(y, m, day).unwrap()
    }

    #[test]
    fn daily_count_matches_days_between_plus_one() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let out = expand_pattern(&Pattern::daily(), range, d(2024, 1, 1), ExpandOptions::default());
        assert_eq!(out.len(), 31);
    }

    #[test]
    fn every_n_days_two_over_january() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let p = Pattern::every_n_days(2).unwrap();
        let out = expand_pattern(&p, range, d(2024, 1, 1), ExpandOptions::default());
        assert_eq!(out.len(), 16);
        assert!(out.contains(&d(2024, 1, 1)));
        assert!(out.contains(&d(2024, 1, 31)));
        assert!(!out.contains(&d(2024, 1, 2)));
    }

    #[test]
    fn monthly_31_skips_short_months() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let p = Pattern::monthly(31).unwrap();
        let out = expand_pattern(&p, range, d(2024, 1, 1), ExpandOptions::default());
        assert_eq!(out.len(), 7);
        assert!(!out.contains(&d(2024, 2, 28)));
        assert!(out.contains(&d(2024, 1, 31)));
    }

    #[test]
    fn yearly_feb_30_never_emitted() {
        let range = DateRange::new(d(2020, 1, 1), d(2028, 12, 31)).unwrap();
        let p = Pattern::yearly(2, 30).unwrap();
        let out = expand_pattern(&p, range, d(2020, 1, 1), ExpandOptions::default());
        assert!(out.is_empty());
    }

    #[test]
    fn yearly_feb_29_only_leap_years() {
        let range = DateRange::new(d(2020, 1, 1), d(2025, 12, 31)).unwrap();
        let p = Pattern::yearly(2, 29).unwrap();
        let out = expand_pattern(&p, range, d(2020, 1, 1), ExpandOptions::default());
        assert_eq!(out.len(), 1);
        assert!(out.contains(&d(2024, 2, 29)));
    }

    #[test]
    fn nth_weekday_skips_months_without_a_5th_occurrence() {
        // 5th Thursday of February 2023 does not exist.
        let range = DateRange::new(d(2023, 2, 1), d(2023, 2, 28)).unwrap();
        let p = Pattern::nth_weekday_of_month(5, Weekday::Thu);
        let out = expand_pattern(&p, range, d(2023, 1, 1), ExpandOptions::default());
        assert!(out.is_empty());
    }

    #[test]
    fn nth_to_last_one_equals_last_weekday() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 6, 30)).unwrap();
        let a = expand_pattern(
            &Pattern::nth_to_last_weekday_of_month(1, Weekday::Fri),
            range,
            d(2024, 1, 1),
            ExpandOptions::default(),
        );
        let b = expand_pattern(
            &Pattern::last_weekday_of_month(Weekday::Fri),
            range,
            d(2024, 1, 1),
            ExpandOptions::default(),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn every_n_weeks_one_equals_weekly() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 3, 31)).unwrap();
        let start = d(2024, 1, 3); // a Wednesday
        let a = expand_pattern(&Pattern::weekly(None), range, start, ExpandOptions::default());
        let b = expand_pattern(
            &Pattern::every_n_weeks(1, Some(weekday(start))).unwrap(),
            range,
            start,
            ExpandOptions::default(),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn union_of_pattern_with_itself_is_idempotent() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let p = Pattern::daily();
        let union = Pattern::union(vec![p.clone(), p.clone()]);
        let a = expand_pattern(&p, range, d(2024, 1, 1), ExpandOptions::default());
        let b = expand_pattern(&union, range, d(2024, 1, 1), ExpandOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn except_with_no_exceptions_is_identity() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let p = Pattern::daily();
        let excepted = Pattern::except(p.clone(), vec![]);
        let a = expand_pattern(&p, range, d(2024, 1, 1), ExpandOptions::default());
        let b = expand_pattern(&excepted, range, d(2024, 1, 1), ExpandOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn except_order_does_not_matter() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 10)).unwrap();
        let base = Pattern::daily();
        let e1 = Pattern::every_n_days(2).unwrap();
        let e2 = Pattern::weekdays([Weekday::Fri].into_iter().collect()).unwrap();
        let a = Pattern::except(base.clone(), vec![e1.clone(), e2.clone()]);
        let b = Pattern::except(base, vec![e2, e1]);
        let start = d(2024, 1, 1);
        assert_eq!(
            expand_pattern(&a, range, start, ExpandOptions::default()),
            expand_pattern(&b, range, start, ExpandOptions::default())
        );
    }

    #[test]
    fn range_monotonicity() {
        let wide = DateRange::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let narrow = DateRange::new(d(2024, 3, 1), d(2024, 9, 30)).unwrap();
        let p = Pattern::weekdays([Weekday::Mon, Weekday::Wed].into_iter().collect()).unwrap();
        let start = d(2024, 1, 1);
        let wide_set = expand_pattern(&p, wide, start, ExpandOptions::default());
        let narrow_set = expand_pattern(&p, narrow, start, ExpandOptions::default());
        assert!(narrow_set.is_subset(&wide_set));
    }

    #[test]
    fn count_option_keeps_earliest_k() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let out = expand_pattern(&Pattern::daily(), range, d(2024, 1, 1), ExpandOptions { count: Some(3) });
        assert_eq!(out.into_iter().collect::<Vec<_>>(), vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
    }

    #[test]
    fn invalid_range_is_rejected() {
        assert!(DateRange::new(d(2024, 1, 10), d(2024, 1, 1)).is_err());
    }

    #[test]
    fn seed_start_after_range_clips_to_series_start() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let out = expand_pattern(&Pattern::daily(), range, d(2024, 1, 15), ExpandOptions::default());
        assert_eq!(out.len(), 17);
        assert!(!out.contains(&d(2024, 1, 14)));
    }
}
