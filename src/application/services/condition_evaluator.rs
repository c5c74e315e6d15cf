//! Condition evaluation (§4.G)
//!
//! A boolean tree over completion history, attached at pattern leaves.
//! Evaluated against a `CompletionStore` — the completion-store query layer
//! is an out-of-scope external collaborator (§1); only the interface this
//! module consumes is defined here, the way `application::services`
//! elsewhere only depends on the repository traits it needs.

use crate::domain::entities::{CompareOp, Completion, Condition, Target};
use crate::domain::value_objects::calendar::{add_days, days_between};
use crate::domain::value_objects::LocalDate;

/// The completion-history query surface condition evaluation needs.
/// `target` may be a single series or a tag (resolved to its tagged series'
/// completions, aggregated); resolution happens inside the implementation.
pub trait CompletionStore {
    fn completions_in_window(
        &self,
        target: &Target,
        window_start: LocalDate,
        window_end: LocalDate,
    ) -> Vec<Completion>;

    fn last_completion(&self, target: &Target) -> Option<Completion>;
}

/// Sentinel for "never completed" in `daysSince`: larger than any real gap,
/// so only `>=`, `>`, `!=` are satisfied against it, matching the spec's
/// "never completed acts as +infinity".
const NEVER_COMPLETED: i64 = i64::MAX;

pub fn evaluate_condition(condition: &Condition, store: &dyn CompletionStore, as_of: LocalDate) -> bool {
    match condition {
        Condition::Count { target, op, value, window_days } => {
            let window_start = add_days(as_of, -(i64::from(*window_days) - 1));
            let count = store.completions_in_window(target, window_start, as_of).len() as i64;
            op.apply(count, *value)
        }
        Condition::DaysSince { target, op, value } => {
            let days_since = match store.last_completion(target) {
                Some(c) => days_between(c.instance_date, as_of),
                None => NEVER_COMPLETED,
            };
            op.apply(days_since, *value)
        }
        Condition::And { children } => children.iter().all(|c| evaluate_condition(c, store, as_of)),
        Condition::Or { children } => children.iter().any(|c| evaluate_condition(c, store, as_of)),
        Condition::Not { child } => !evaluate_condition(child, store, as_of),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CompletionId, SeriesId};
    use crate::domain::value_objects::calendar::make_date;

    struct FakeStore(Vec<Completion>);

    impl CompletionStore for FakeStore {
        fn completions_in_window(&self, target: &Target, window_start: LocalDate, window_end: LocalDate) -> Vec<Completion> {
            self.0
                .iter()
                .filter(|c| matches!(target, Target::Series(id) if *id == c.series_id))
                .filter(|c| c.instance_date >= window_start && c.instance_date <= window_end)
                .cloned()
                .collect()
        }

        fn last_completion(&self, target: &Target) -> Option<Completion> {
            self.0
                .iter()
                .filter(|c| matches!(target, Target::Series(id) if *id == c.series_id))
                .max_by_key(|c| c.instance_date)
                .cloned()
        }
    }

    fn completion(series: SeriesId, date: LocalDate) -> Completion {
        Completion {
            id: CompletionId(1),
            series_id: series,
            instance_date: date,
            start_time: None,
            end_time: None,
            duration_minutes: None,
        }
    }

    #[test]
    fn count_window_is_inclusive_both_ends() {
        let series = SeriesId(1);
        let store = FakeStore(vec![
            completion(series, make_date(2024, 1, 1).unwrap()),
            completion(series, make_date(2024, 1, 5).unwrap()),
            completion(series, make_date(2024, 1, 10).unwrap()),
        ]);
        let cond = Condition::Count {
            target: Target::Series(series),
            op: CompareOp::Ge,
            value: 2,
            window_days: 5,
        };
        // asOf=2024-01-05, window=[2024-01-01, 2024-01-05]: two completions in range.
        assert!(evaluate_condition(&cond, &store, make_date(2024, 1, 5).unwrap()));
    }

    #[test]
    fn days_since_never_completed_is_infinite() {
        let series = SeriesId(1);
        let store = FakeStore(vec![]);
        let ge = Condition::DaysSince { target: Target::Series(series), op: CompareOp::Ge, value: 9999 };
        let lt = Condition::DaysSince { target: Target::Series(series), op: CompareOp::Lt, value: 9999 };
        assert!(evaluate_condition(&ge, &store, make_date(2024, 1, 1).unwrap()));
        assert!(!evaluate_condition(&lt, &store, make_date(2024, 1, 1).unwrap()));
    }

    #[test]
    fn and_or_not_compose() {
        let series = SeriesId(1);
        let store = FakeStore(vec![completion(series, make_date(2024, 1, 1).unwrap())]);
        let has_one = Condition::Count { target: Target::Series(series), op: CompareOp::Ge, value: 1, window_days: 365 };
        let has_zero = Condition::Count { target: Target::Series(series), op: CompareOp::Eq, value: 0, window_days: 365 };
        let and = Condition::And { children: vec![has_one.clone(), has_zero.clone()] };
        let or = Condition::Or { children: vec![has_one.clone(), has_zero.clone()] };
        let not = Condition::Not { child: Box::new(has_zero) };
        assert!(!evaluate_condition(&and, &store, make_date(2024, 1, 1).unwrap()));
        assert!(evaluate_condition(&or, &store, make_date(2024, 1, 1).unwrap()));
        assert!(evaluate_condition(&not, &store, make_date(2024, 1, 1).unwrap()));
    }
}
