//! Instance-exception overlay and per-series schedule assembly (§4.C, §4.D)
//!
//! Composes pattern expansion with per-instance exceptions to produce the
//! list of concrete `{date, time, seriesId}` occurrences a series actually
//! has over a queried range, and hosts the exception lifecycle operations
//! (`cancelInstance` / `rescheduleInstance` / `restoreInstance`) that check
//! membership against the series' own patterns before mutating state.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::domain::entities::{
    ExceptionType, GuardedPattern, InstanceException, Series,
};
use crate::domain::errors::CoreError;
use crate::domain::repositories::{ExceptionRepository, PatternRepository, SeriesRepository};
use crate::domain::value_objects::calendar::make_date_time;
use crate::domain::value_objects::{LocalDate, LocalDateTime};

use super::condition_evaluator::{evaluate_condition, CompletionStore};
use super::pattern_expansion::{expand_pattern, DateRange, ExpandOptions};

/// A single concrete occurrence, ready to surface to a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledOccurrence {
    pub series_id: crate::domain::entities::SeriesId,
    pub date: LocalDate,
    pub time: crate::domain::value_objects::LocalTime,
}

impl ScheduledOccurrence {
    pub fn date_time(&self) -> LocalDateTime {
        make_date_time(self.date, self.time)
    }
}

/// Expands every pattern bound to `series_id` (honoring each pattern's
/// condition gate, when a completion store is supplied) into one date set.
fn expand_series_patterns(
    patterns: &[GuardedPattern],
    range: DateRange,
    series_start: LocalDate,
    as_of: LocalDate,
    store: Option<&dyn CompletionStore>,
) -> std::collections::BTreeSet<LocalDate> {
    let mut out = std::collections::BTreeSet::new();
    for guarded in patterns {
        if let (Some(cond), Some(store)) = (&guarded.condition, store) {
            if !evaluate_condition(cond, store, as_of) {
                continue;
            }
        }
        out.extend(expand_pattern(
            &guarded.pattern,
            range,
            series_start,
            ExpandOptions::default(),
        ));
    }
    out
}

/// `getSchedule(seriesId, range)` (§4.C/D): intersects `range` with the
/// series' own `[startDate, endDate]`, expands its patterns, and overlays
/// exceptions. Ordered by date.
pub fn get_schedule(
    series: &Series,
    patterns: &[GuardedPattern],
    exceptions: &[InstanceException],
    range: DateRange,
    as_of: LocalDate,
    completion_store: Option<&dyn CompletionStore>,
) -> Result<Vec<ScheduledOccurrence>, CoreError> {
    let effective_start = match series.start_date {
        Some(s) if s > range.start => s,
        _ => range.start,
    };
    let effective_end = match series.end_date {
        Some(e) if e < range.end => e,
        _ => range.end,
    };
    if effective_start > effective_end {
        trace!(series_id = %series.id, "effective range empty, no occurrences");
        return Ok(Vec::new());
    }
    let effective_range = DateRange::new(effective_start, effective_end)?;

    let dates = expand_series_patterns(
        patterns,
        effective_range,
        series.start_date.unwrap_or(effective_start),
        as_of,
        completion_store,
    );
    debug!(series_id = %series.id, count = dates.len(), "expanded series patterns");

    let by_date: HashMap<LocalDate, &InstanceException> =
        exceptions.iter().map(|e| (e.original_date, e)).collect();

    let mut out = Vec::new();
    for date in dates {
        match by_date.get(&date) {
            Some(exc) if exc.exception_type == ExceptionType::Cancelled => continue,
            Some(exc) if exc.exception_type == ExceptionType::Rescheduled => {
                let new_time = exc.new_time.expect("rescheduled exceptions carry newTime");
                let new_date = new_time.date();
                if new_date < range.start || new_date > range.end {
                    continue;
                }
                out.push(ScheduledOccurrence {
                    series_id: series.id,
                    date: new_date,
                    time: new_time.time(),
                });
            }
            _ => out.push(ScheduledOccurrence {
                series_id: series.id,
                date,
                time: series.effective_time(),
            }),
        }
    }
    out.sort_by_key(|o| o.date_time());
    Ok(out)
}

/// Whether `date` is a genuine occurrence of `series` per its patterns
/// (ignoring exceptions), used to validate exception-lifecycle operations.
fn is_valid_instance(
    series: &Series,
    patterns: &[GuardedPattern],
    date: LocalDate,
) -> Result<bool, CoreError> {
    let start = series.start_date.unwrap_or(date);
    if let Some(s) = series.start_date {
        if date < s {
            return Ok(false);
        }
    }
    if let Some(e) = series.end_date {
        if date > e {
            return Ok(false);
        }
    }
    let range = DateRange::new(date, date)?;
    let dates = expand_series_patterns(patterns, range, start, date, None);
    Ok(dates.contains(&date))
}

/// `cancelInstance(series, date)` (§4.C).
pub fn cancel_instance<A: SeriesRepository + PatternRepository + ExceptionRepository>(
    adapter: &mut A,
    series_id: crate::domain::entities::SeriesId,
    date: LocalDate,
    new_id: impl FnOnce() -> crate::domain::entities::ExceptionId,
) -> Result<(), CoreError> {
    let series = adapter.get(series_id)?;
    let patterns: Vec<GuardedPattern> = adapter
        .list_by_series(series_id)
        .into_iter()
        .map(|(_, p)| p)
        .collect();

    let existing = ExceptionRepository::get(adapter, series_id, date);
    if let Some(existing) = &existing {
        if existing.exception_type == ExceptionType::Cancelled {
            return Err(CoreError::AlreadyCancelledError(format!(
                "series {series_id} date {date}"
            )));
        }
    } else if !is_valid_instance(&series, &patterns, date)? {
        return Err(CoreError::NonExistentInstanceError(format!(
            "series {series_id} date {date}"
        )));
    }

    let exc = InstanceException::cancelled(new_id(), series_id, date);
    adapter.upsert(exc)
}

/// `rescheduleInstance(series, date, newTime)` (§4.C).
pub fn reschedule_instance<A: SeriesRepository + PatternRepository + ExceptionRepository>(
    adapter: &mut A,
    series_id: crate::domain::entities::SeriesId,
    date: LocalDate,
    new_time: LocalDateTime,
    new_id: impl FnOnce() -> crate::domain::entities::ExceptionId,
) -> Result<(), CoreError> {
    let series = adapter.get(series_id)?;
    let patterns: Vec<GuardedPattern> = adapter
        .list_by_series(series_id)
        .into_iter()
        .map(|(_, p)| p)
        .collect();

    let existing = ExceptionRepository::get(adapter, series_id, date);
    if let Some(existing) = &existing {
        if existing.exception_type == ExceptionType::Cancelled {
            return Err(CoreError::CancelledInstanceError(format!(
                "series {series_id} date {date}"
            )));
        }
    } else if !is_valid_instance(&series, &patterns, date)? {
        return Err(CoreError::NonExistentInstanceError(format!(
            "series {series_id} date {date}"
        )));
    }

    let exc = InstanceException::rescheduled(new_id(), series_id, date, new_time);
    adapter.upsert(exc)
}

/// `restoreInstance(series, date)` (§4.C): deletes the exception row.
pub fn restore_instance<A: ExceptionRepository>(
    adapter: &mut A,
    series_id: crate::domain::entities::SeriesId,
    date: LocalDate,
) -> Result<(), CoreError> {
    if ExceptionRepository::get(adapter, series_id, date).is_none() {
        return Err(CoreError::NoExceptionError(format!(
            "series {series_id} date {date}"
        )));
    }
    adapter.delete(series_id, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Pattern, SeriesId};
    use crate::domain::value_objects::calendar::{make_date, make_date_time, midnight};

    fn daily_series(start: LocalDate) -> Series {
        let mut s = Series::new(SeriesId(1), "daily", make_date_time(start, midnight()));
        s.start_date = Some(start);
        s.time_of_day = Some(crate::domain::entities::TimeOfDay::Fixed(
            crate::domain::value_objects::calendar::parse_time("09:00:00").unwrap(),
        ));
        s
    }

    fn guarded(pattern: Pattern) -> GuardedPattern {
        GuardedPattern { pattern, condition: None }
    }

    #[test]
    fn s1_daily_with_cancel() {
        let start = make_date(2024, 1, 1).unwrap();
        let series = daily_series(start);
        let patterns = vec![guarded(Pattern::daily())];
        let cancel_date = make_date(2024, 1, 15).unwrap();
        let exceptions = vec![InstanceException::cancelled(
            crate::domain::entities::ExceptionId(1),
            series.id,
            cancel_date,
        )];
        let range = DateRange::new(start, make_date(2024, 1, 20).unwrap()).unwrap();
        let out = get_schedule(&series, &patterns, &exceptions, range, start, None).unwrap();
        assert_eq!(out.len(), 19);
        assert!(!out.iter().any(|o| o.date == cancel_date));
    }

    #[test]
    fn s2_reschedule_out_of_range_drops_silently() {
        let start = make_date(2024, 1, 1).unwrap();
        let series = daily_series(start);
        let patterns = vec![guarded(Pattern::daily())];
        let original = make_date(2024, 1, 15).unwrap();
        let new_time = make_date_time(
            make_date(2024, 3, 1).unwrap(),
            crate::domain::value_objects::calendar::parse_time("09:00:00").unwrap(),
        );
        let exceptions = vec![InstanceException::rescheduled(
            crate::domain::entities::ExceptionId(1),
            series.id,
            original,
            new_time,
        )];
        let range = DateRange::new(start, make_date(2024, 1, 31).unwrap()).unwrap();
        let out = get_schedule(&series, &patterns, &exceptions, range, start, None).unwrap();
        assert!(!out.iter().any(|o| o.date == original));
        assert!(!out.iter().any(|o| o.date == make_date(2024, 3, 1).unwrap()));
    }

    #[test]
    fn reschedule_into_range_lands_at_new_date() {
        let start = make_date(2024, 1, 1).unwrap();
        let series = daily_series(start);
        let patterns = vec![guarded(Pattern::daily())];
        let original = make_date(2024, 1, 15).unwrap();
        let new_time = make_date_time(
            make_date(2024, 1, 18).unwrap(),
            crate::domain::value_objects::calendar::parse_time("14:00:00").unwrap(),
        );
        let exceptions = vec![InstanceException::rescheduled(
            crate::domain::entities::ExceptionId(1),
            series.id,
            original,
            new_time,
        )];
        let range = DateRange::new(start, make_date(2024, 1, 31).unwrap()).unwrap();
        let out = get_schedule(&series, &patterns, &exceptions, range, start, None).unwrap();
        let moved = out.iter().find(|o| o.date == make_date(2024, 1, 18).unwrap()).unwrap();
        assert_eq!(moved.time, crate::domain::value_objects::calendar::parse_time("14:00:00").unwrap());
    }

    /// `cancel_instance`/`reschedule_instance`/`restore_instance` are generic
    /// over any adapter implementing the three repository traits they need;
    /// this combines mocked traits into one so the tests below exercise that
    /// code against expectations rather than the in-memory adapter.
    struct MockAdapter {
        series: crate::domain::repositories::MockSeriesRepository,
        patterns: crate::domain::repositories::MockPatternRepository,
        exceptions: crate::domain::repositories::MockExceptionRepository,
    }

    impl SeriesRepository for MockAdapter {
        fn create(&mut self, series: Series) -> Result<SeriesId, CoreError> {
            self.series.create(series)
        }
        fn get(&self, id: SeriesId) -> Result<Series, CoreError> {
            self.series.get(id)
        }
        fn update(&mut self, series: Series) -> Result<(), CoreError> {
            self.series.update(series)
        }
        fn delete(&mut self, id: SeriesId) -> Result<(), CoreError> {
            self.series.delete(id)
        }
        fn get_all(&self) -> Vec<Series> {
            self.series.get_all()
        }
        fn get_by_tag(&self, tag: &str) -> Vec<Series> {
            self.series.get_by_tag(tag)
        }
    }

    impl PatternRepository for MockAdapter {
        fn create(&mut self, series_id: SeriesId, pattern: GuardedPattern) -> Result<crate::domain::entities::PatternId, CoreError> {
            self.patterns.create(series_id, pattern)
        }
        fn get(&self, id: crate::domain::entities::PatternId) -> Result<GuardedPattern, CoreError> {
            self.patterns.get(id)
        }
        fn delete(&mut self, id: crate::domain::entities::PatternId) -> Result<(), CoreError> {
            self.patterns.delete(id)
        }
        fn list_by_series(&self, series_id: SeriesId) -> Vec<(crate::domain::entities::PatternId, GuardedPattern)> {
            self.patterns.list_by_series(series_id)
        }
        fn set_weekdays(
            &mut self,
            id: crate::domain::entities::PatternId,
            weekdays: std::collections::BTreeSet<crate::domain::value_objects::Weekday>,
        ) -> Result<(), CoreError> {
            self.patterns.set_weekdays(id, weekdays)
        }
    }

    impl ExceptionRepository for MockAdapter {
        fn upsert(&mut self, exception: InstanceException) -> Result<(), CoreError> {
            self.exceptions.upsert(exception)
        }
        fn get(&self, series_id: SeriesId, original_date: LocalDate) -> Option<InstanceException> {
            self.exceptions.get(series_id, original_date)
        }
        fn list_by_series(&self, series_id: SeriesId) -> Vec<InstanceException> {
            self.exceptions.list_by_series(series_id)
        }
        fn list_in_range(&self, series_id: SeriesId, start: LocalDate, end: LocalDate) -> Vec<InstanceException> {
            self.exceptions.list_in_range(series_id, start, end)
        }
        fn delete(&mut self, series_id: SeriesId, original_date: LocalDate) -> Result<(), CoreError> {
            self.exceptions.delete(series_id, original_date)
        }
    }

    #[test]
    fn cancel_instance_persists_exception_via_mocked_adapter() {
        let start = make_date(2024, 1, 1).unwrap();
        let series = daily_series(start);

        let mut mock_series = crate::domain::repositories::MockSeriesRepository::new();
        let series_for_get = series.clone();
        mock_series.expect_get().returning(move |_| Ok(series_for_get.clone()));

        let mut mock_patterns = crate::domain::repositories::MockPatternRepository::new();
        mock_patterns
            .expect_list_by_series()
            .returning(|_| vec![(crate::domain::entities::PatternId(1), guarded(Pattern::daily()))]);

        let mut mock_exceptions = crate::domain::repositories::MockExceptionRepository::new();
        mock_exceptions.expect_get().returning(|_, _| None);
        mock_exceptions
            .expect_upsert()
            .withf(|exc| exc.exception_type == ExceptionType::Cancelled)
            .returning(|_| Ok(()));

        let mut adapter = MockAdapter { series: mock_series, patterns: mock_patterns, exceptions: mock_exceptions };
        let result = cancel_instance(
            &mut adapter,
            series.id,
            make_date(2024, 1, 10).unwrap(),
            || crate::domain::entities::ExceptionId(1),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn cancel_instance_rejects_nonexistent_occurrence_without_touching_exceptions() {
        let start = make_date(2024, 1, 1).unwrap();
        let series = daily_series(start);

        let mut mock_series = crate::domain::repositories::MockSeriesRepository::new();
        let series_for_get = series.clone();
        mock_series.expect_get().returning(move |_| Ok(series_for_get.clone()));

        let mut mock_patterns = crate::domain::repositories::MockPatternRepository::new();
        mock_patterns
            .expect_list_by_series()
            .returning(|_| vec![(crate::domain::entities::PatternId(1), guarded(Pattern::daily()))]);

        let mut mock_exceptions = crate::domain::repositories::MockExceptionRepository::new();
        mock_exceptions.expect_get().returning(|_, _| None);
        mock_exceptions.expect_upsert().never();

        let mut adapter = MockAdapter { series: mock_series, patterns: mock_patterns, exceptions: mock_exceptions };
        // Before the series' own startDate: never a valid occurrence.
        let result = cancel_instance(
            &mut adapter,
            series.id,
            make_date(2023, 12, 1).unwrap(),
            || crate::domain::entities::ExceptionId(1),
        );
        assert!(matches!(result, Err(CoreError::NonExistentInstanceError(_))));
    }
}
