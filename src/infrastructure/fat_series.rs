//! Fat-series marshaling (§9)
//!
//! A series rarely travels alone: a caller loading one for display or
//! editing wants its patterns, exceptions, tags and adaptive-duration/
//! cycling config in one shot, and saving a freshly-built series back
//! means walking all of those in the opposite direction. `load_series`
//! and `save_series` do that walk against any `Adapter`, the way the
//! teacher's `AnalyzeJobs` use case walks a whole `JobRepository` rather
//! than asking callers to stitch per-entity fetches together themselves.
//!
//! Conditions are the one piece that needs real reconstruction: they
//! persist as flat rows with a `parentId` pointer (`ConditionRepository`),
//! while the in-memory shape used everywhere else (`GuardedPattern`,
//! `Condition`) is a tree. `reconstruct_forest` does the bottom-up join;
//! `flatten_condition` is its inverse, used on save so the normalized rows
//! stay consistent with whatever condition tree the caller attached to a
//! pattern.

use crate::domain::entities::{
    AdaptiveDurationConfig, Condition, ConditionId, CyclingConfig, GuardedPattern, InstanceException,
    Series, SeriesId, Tag,
};
use crate::domain::errors::CoreError;
use crate::domain::repositories::{
    Adapter, ConditionRepository, ConditionRow, ConditionRowKind, CyclingConfigRepository,
    ExceptionRepository, PatternRepository, SeriesRepository, TagRepository,
};

/// Everything hanging off a `Series`, assembled in one call.
#[derive(Debug, Clone, PartialEq)]
pub struct FatSeries {
    pub series: Series,
    pub patterns: Vec<GuardedPattern>,
    pub exceptions: Vec<InstanceException>,
    pub tags: Vec<Tag>,
    pub cycling_config: Option<CyclingConfig>,
    pub adaptive_duration_config: Option<AdaptiveDurationConfig>,
}

/// Reconstructs the condition forest persisted for `series_id`: one
/// `Condition` tree per root row (`parentId` is `None`), in ascending id
/// order. A `Not` row with no persisted child reconstructs as an empty
/// `And`, which evaluates to `true` the same way an empty source list
/// does in `relational_constraint_checker` — vacuously, rather than
/// panicking on adapter-level corruption.
fn reconstruct_forest(rows: &[ConditionRow]) -> Vec<Condition> {
    let mut roots: Vec<&ConditionRow> = rows.iter().filter(|r| r.parent_id.is_none()).collect();
    roots.sort_by_key(|r| r.id.0);
    roots.into_iter().map(|root| reconstruct_one(rows, root)).collect()
}

fn reconstruct_one(rows: &[ConditionRow], row: &ConditionRow) -> Condition {
    match &row.kind {
        ConditionRowKind::Count { target, op, value, window_days } => {
            Condition::Count { target: target.clone(), op: *op, value: *value, window_days: *window_days }
        }
        ConditionRowKind::DaysSince { target, op, value } => {
            Condition::DaysSince { target: target.clone(), op: *op, value: *value }
        }
        ConditionRowKind::And => Condition::And { children: reconstruct_children(rows, row.id) },
        ConditionRowKind::Or => Condition::Or { children: reconstruct_children(rows, row.id) },
        ConditionRowKind::Not => {
            let children = reconstruct_children(rows, row.id);
            match children.into_iter().next() {
                Some(child) => Condition::Not { child: Box::new(child) },
                None => Condition::And { children: Vec::new() },
            }
        }
    }
}

fn reconstruct_children(rows: &[ConditionRow], parent: ConditionId) -> Vec<Condition> {
    let mut children: Vec<&ConditionRow> = rows.iter().filter(|r| r.parent_id == Some(parent)).collect();
    children.sort_by_key(|r| r.id.0);
    children.iter().map(|row| reconstruct_one(rows, row)).collect()
}

/// Persists `condition` under `series_id` as a flat forest, top-down, with
/// fresh opaque ids (§9). Returns the id of the row created for `condition`
/// itself, so a caller building a larger tree can link siblings under it.
fn flatten_condition<A: ConditionRepository>(
    adapter: &mut A,
    series_id: SeriesId,
    parent_id: Option<ConditionId>,
    condition: &Condition,
) -> Result<ConditionId, CoreError> {
    let kind = match condition {
        Condition::Count { target, op, value, window_days } => {
            ConditionRowKind::Count { target: target.clone(), op: *op, value: *value, window_days: *window_days }
        }
        Condition::DaysSince { target, op, value } => {
            ConditionRowKind::DaysSince { target: target.clone(), op: *op, value: *value }
        }
        Condition::And { .. } => ConditionRowKind::And,
        Condition::Or { .. } => ConditionRowKind::Or,
        Condition::Not { .. } => ConditionRowKind::Not,
    };
    let id = adapter.create(ConditionRow { id: ConditionId(0), series_id, parent_id, kind })?;
    match condition {
        Condition::And { children } | Condition::Or { children } => {
            for child in children {
                flatten_condition(adapter, series_id, Some(id), child)?;
            }
        }
        Condition::Not { child } => {
            flatten_condition(adapter, series_id, Some(id), child)?;
        }
        Condition::Count { .. } | Condition::DaysSince { .. } => {}
    }
    Ok(id)
}

/// Assembles a `FatSeries` from every adapter-owned table that hangs off
/// `series_id`. `GuardedPattern.condition` (via `PatternRepository`) is
/// the authoritative in-memory condition tree; the normalized rows in
/// `ConditionRepository` are a persisted mirror kept for adapters that
/// need a flat, queryable form rather than a nested one, and are not
/// consulted here.
pub fn load_series<A: Adapter>(series_id: SeriesId, adapter: &A) -> Result<FatSeries, CoreError> {
    let series = SeriesRepository::get(adapter, series_id)?;
    let patterns = PatternRepository::list_by_series(adapter, series_id)
        .into_iter()
        .map(|(_, pattern)| pattern)
        .collect();
    let exceptions = ExceptionRepository::list_by_series(adapter, series_id);
    let tags = TagRepository::tags_for_series(adapter, series_id);
    let cycling_config = CyclingConfigRepository::get(adapter, series_id);
    let adaptive_duration_config = crate::domain::repositories::AdaptiveDurationConfigRepository::get(adapter, series_id);
    Ok(FatSeries { series, patterns, exceptions, tags, cycling_config, adaptive_duration_config })
}

/// Persists a `FatSeries` as a brand-new series: every id in `fat.series`
/// and its children is discarded in favor of fresh ones minted by the
/// adapter, so `save_series` is for creating a series from a built-up
/// in-memory record, not for updating one in place (`update_series`
/// callers should go through the individual repository traits directly).
/// Returns the freshly minted series id.
pub fn save_series<A: Adapter>(fat: &FatSeries, adapter: &mut A) -> Result<SeriesId, CoreError> {
    let series_id = SeriesRepository::create(adapter, fat.series.clone())?;

    for pattern in &fat.patterns {
        PatternRepository::create(adapter, series_id, pattern.clone())?;
        if let Some(condition) = &pattern.condition {
            flatten_condition(adapter, series_id, None, condition)?;
        }
    }

    for exception in &fat.exceptions {
        let mut exception = exception.clone();
        exception.series_id = series_id;
        ExceptionRepository::upsert(adapter, exception)?;
    }

    for tag in &fat.tags {
        let tag_id = TagRepository::create_idempotent(adapter, &tag.name);
        TagRepository::add_association(adapter, series_id, tag_id)?;
    }

    if let Some(cycling_config) = &fat.cycling_config {
        let mut cycling_config = cycling_config.clone();
        cycling_config.series_id = series_id;
        CyclingConfigRepository::set(adapter, Some(cycling_config), series_id)?;
    }

    if let Some(adaptive_duration_config) = &fat.adaptive_duration_config {
        let mut adaptive_duration_config = *adaptive_duration_config;
        adaptive_duration_config.series_id = series_id;
        crate::domain::repositories::AdaptiveDurationConfigRepository::set(
            adapter,
            Some(adaptive_duration_config),
            series_id,
        )?;
    }

    Ok(series_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CompareOp, Pattern, SampleMode, Target};
    use crate::domain::value_objects::calendar::{make_date, make_date_time, midnight};
    use crate::domain::value_objects::Minutes;
    use crate::infrastructure::repositories::InMemoryAdapter;

    fn sample_series() -> Series {
        Series::new(SeriesId(0), "nightly backup", make_date_time(make_date(2024, 1, 1).unwrap(), midnight()))
    }

    #[test]
    fn round_trips_patterns_exceptions_and_tags() {
        let mut adapter = InMemoryAdapter::new();
        let condition = Condition::And {
            children: vec![
                Condition::Count {
                    target: Target::Series(SeriesId(999)),
                    op: CompareOp::Ge,
                    value: 1,
                    window_days: 7,
                },
                Condition::Not {
                    child: Box::new(Condition::DaysSince {
                        target: Target::Series(SeriesId(999)),
                        op: CompareOp::Lt,
                        value: 1,
                    }),
                },
            ],
        };
        let fat = FatSeries {
            series: sample_series(),
            patterns: vec![GuardedPattern { pattern: Pattern::daily(), condition: Some(condition) }],
            exceptions: vec![InstanceException::cancelled(
                crate::domain::entities::ExceptionId(0),
                SeriesId(0),
                make_date(2024, 1, 5).unwrap(),
            )],
            tags: vec![Tag { id: crate::domain::entities::TagId(0), name: "chores".to_string() }],
            cycling_config: None,
            adaptive_duration_config: Some(AdaptiveDurationConfig {
                series_id: SeriesId(0),
                mode: SampleMode::LastN(5),
                fallback: Minutes::new(30),
                multiplier_milli: 1000,
                minimum: None,
                maximum: None,
            }),
        };

        let series_id = save_series(&fat, &mut adapter).unwrap();
        let loaded = load_series(series_id, &adapter).unwrap();

        assert_eq!(loaded.patterns.len(), 1);
        assert!(loaded.patterns[0].condition.is_some());
        assert_eq!(loaded.exceptions.len(), 1);
        assert_eq!(loaded.tags.len(), 1);
        assert_eq!(loaded.tags[0].name, "chores");
        assert!(loaded.adaptive_duration_config.is_some());

        let rows = ConditionRepository::list_by_series(&adapter, series_id);
        assert!(!rows.is_empty());
        let forest = reconstruct_forest(&rows);
        assert_eq!(forest.len(), 1);
    }
}
