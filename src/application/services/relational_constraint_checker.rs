//! Relational constraint checker (§3, §4.F)
//!
//! Evaluates day-level and intra-day pairwise constraints between two soft
//! targets (a series or a tag, resolved to tagged series at check time).
//! Target resolution and on-date instance collection are adapter/schedule
//! concerns the caller performs; this module is the pure predicate logic
//! over the resolved instance lists, the same split `application::services`
//! keeps between "pure algorithm" and "adapter-backed assembly" elsewhere.

use crate::domain::entities::{RelationalConstraint, RelationalConstraintType, SeriesId};
use crate::domain::value_objects::{LocalDateTime, Minutes};

/// One series' occurrence on the checked date, already resolved through
/// exceptions and pattern membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInstance {
    pub series_id: SeriesId,
    pub all_day: bool,
    pub start: LocalDateTime,
    pub duration: Minutes,
}

impl DayInstance {
    fn end(&self) -> LocalDateTime {
        self.start + chrono::Duration::minutes(i64::from(self.duration.value()))
    }
}

/// `checkConstraint(constraint, date)` (§4.F).
///
/// `source_instances`/`dest_instances` are the resolved side's on-date
/// instances (every series matching the soft target, honoring exceptions
/// and startDate/endDate); `all_instances` is every timed instance on the
/// date across the whole system, needed only by the `next to` types.
pub fn check_constraint(
    constraint: &RelationalConstraint,
    source_instances: &[DayInstance],
    dest_instances: &[DayInstance],
    all_instances: &[DayInstance],
) -> bool {
    if source_instances.is_empty() {
        return true;
    }

    match constraint.constraint_type {
        RelationalConstraintType::MustBeOnSameDay => !dest_instances.is_empty(),
        RelationalConstraintType::CantBeOnSameDay => dest_instances.is_empty(),

        RelationalConstraintType::MustBeBefore
        | RelationalConstraintType::MustBeAfter
        | RelationalConstraintType::MustBeWithin
        | RelationalConstraintType::MustBeNextTo
        | RelationalConstraintType::CantBeNextTo => {
            let timed_sources: Vec<&DayInstance> = source_instances.iter().filter(|i| !i.all_day).collect();
            let timed_dests: Vec<&DayInstance> = dest_instances.iter().filter(|i| !i.all_day).collect();
            if timed_dests.is_empty() {
                return true;
            }
            match constraint.constraint_type {
                RelationalConstraintType::MustBeBefore => timed_sources
                    .iter()
                    .all(|s| timed_dests.iter().all(|d| s.start < d.start)),
                RelationalConstraintType::MustBeAfter => timed_sources
                    .iter()
                    .all(|s| timed_dests.iter().all(|d| s.start > d.start)),
                RelationalConstraintType::MustBeWithin => {
                    let within = constraint.within.unwrap_or(Minutes::ZERO).value();
                    timed_sources.iter().all(|s| {
                        timed_dests.iter().any(|d| edge_gap_minutes(s, d) <= u64::from(within))
                    })
                }
                RelationalConstraintType::MustBeNextTo => is_next_to(all_instances, source_instances, dest_instances),
                RelationalConstraintType::CantBeNextTo => {
                    !is_next_to(all_instances, source_instances, dest_instances)
                }
                _ => unreachable!(),
            }
        }
    }
}

/// Minimum edge-to-edge gap in minutes between two instances; `0` when they
/// overlap.
fn edge_gap_minutes(a: &DayInstance, b: &DayInstance) -> u64 {
    if a.start < b.end() && b.start < a.end() {
        return 0;
    }
    let gap = if a.end() <= b.start {
        b.start - a.end()
    } else {
        a.start - b.end()
    };
    gap.num_minutes().max(0) as u64
}

fn is_next_to(all_instances: &[DayInstance], source: &[DayInstance], dest: &[DayInstance]) -> bool {
    let source_ids: std::collections::HashSet<SeriesId> = source.iter().map(|i| i.series_id).collect();
    let dest_ids: std::collections::HashSet<SeriesId> = dest.iter().map(|i| i.series_id).collect();

    let mut timed: Vec<&DayInstance> = all_instances.iter().filter(|i| !i.all_day).collect();
    timed.sort_by_key(|i| i.start);

    timed.windows(2).any(|pair| {
        let (a, b) = (pair[0], pair[1]);
        (source_ids.contains(&a.series_id) && dest_ids.contains(&b.series_id))
            || (dest_ids.contains(&a.series_id) && source_ids.contains(&b.series_id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RelationalConstraintId, Target};
    use crate::domain::value_objects::calendar::{make_date, make_date_time, parse_time};

    fn inst(series: u64, time: &str, duration: u32) -> DayInstance {
        DayInstance {
            series_id: SeriesId(series),
            all_day: false,
            start: make_date_time(make_date(2024, 1, 1).unwrap(), parse_time(time).unwrap()),
            duration: Minutes::new(duration),
        }
    }

    fn constraint(kind: RelationalConstraintType, within: Option<u32>) -> RelationalConstraint {
        RelationalConstraint {
            id: RelationalConstraintId(1),
            constraint_type: kind,
            source_target: Target::Series(SeriesId(1)),
            dest_target: Target::Series(SeriesId(2)),
            within: within.map(Minutes::new),
        }
    }

    #[test]
    fn no_source_instances_is_vacuously_true() {
        let c = constraint(RelationalConstraintType::MustBeOnSameDay, None);
        assert!(check_constraint(&c, &[], &[], &[]));
    }

    #[test]
    fn must_be_before_all_pairs() {
        let c = constraint(RelationalConstraintType::MustBeBefore, None);
        let source = vec![inst(1, "09:00:00", 30)];
        let dest = vec![inst(2, "10:00:00", 30)];
        assert!(check_constraint(&c, &source, &dest, &[]));
        let dest_early = vec![inst(2, "08:00:00", 30)];
        assert!(!check_constraint(&c, &source, &dest_early, &[]));
    }

    #[test]
    fn must_be_within_overlap_is_zero_gap() {
        let c = constraint(RelationalConstraintType::MustBeWithin, Some(0));
        let source = vec![inst(1, "09:00:00", 60)];
        let dest = vec![inst(2, "09:30:00", 30)];
        assert!(check_constraint(&c, &source, &dest, &[]));
    }

    #[test]
    fn must_be_within_respects_gap_bound() {
        let c = constraint(RelationalConstraintType::MustBeWithin, Some(15));
        let source = vec![inst(1, "09:00:00", 30)];
        let dest = vec![inst(2, "09:50:00", 30)];
        assert!(!check_constraint(&c, &source, &dest, &[]));
        let dest_close = vec![inst(2, "09:40:00", 30)];
        assert!(check_constraint(&c, &source, &dest_close, &[]));
    }

    #[test]
    fn must_be_next_to_checks_global_adjacency() {
        let c = constraint(RelationalConstraintType::MustBeNextTo, None);
        let source = vec![inst(1, "09:00:00", 30)];
        let dest = vec![inst(2, "09:30:00", 30)];
        let intruder = inst(3, "09:15:00", 5);
        let all = vec![source[0], intruder, dest[0]];
        assert!(!check_constraint(&c, &source, &dest, &all));
        let all_adjacent = vec![source[0], dest[0]];
        assert!(check_constraint(&c, &source, &dest, &all_adjacent));
    }

    #[test]
    fn all_day_dest_treated_as_absent_for_intraday_types() {
        let c = constraint(RelationalConstraintType::MustBeBefore, None);
        let source = vec![inst(1, "09:00:00", 30)];
        let mut dest = inst(2, "00:00:00", 0);
        dest.all_day = true;
        assert!(check_constraint(&c, &source, &[dest], &[]));
    }
}
