//! In-memory adapter (§6, §9)
//!
//! A single `HashMap`-backed implementation of every repository trait in
//! `domain::repositories`, grounded in the teacher's
//! `InMemoryJobRepository`: fast for lookups, does not persist across
//! process runs, and exists so the pure algorithms above have something
//! concrete to run against in tests. Ids are minted from one shared
//! monotonic counter (simpler than per-table counters and still stable
//! and opaque, which is all the algorithms require).

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::application::services::CompletionStore;
use crate::domain::entities::{
    AdaptiveDurationConfig, Completion, CompletionId, ConditionId, CyclingConfig, ExceptionId,
    GuardedPattern, InstanceException, Link, LinkId, PatternId, Reminder, ReminderAck, ReminderId,
    RelationalConstraint, RelationalConstraintId, Series, SeriesId, Tag, TagId, Target,
};
use crate::domain::errors::CoreError;
use crate::domain::repositories::{
    AdaptiveDurationConfigRepository, CompletionRepository, ConditionRepository, ConditionRow,
    CyclingConfigRepository, ExceptionRepository, LinkRepository, PatternRepository,
    RelationalConstraintRepository, ReminderRepository, SeriesRepository, TagRepository,
    TransactionManager,
};
use crate::domain::value_objects::{LocalDate, LocalDateTime};

#[derive(Debug, Clone, Default)]
struct State {
    series: HashMap<SeriesId, Series>,
    patterns: HashMap<PatternId, (SeriesId, GuardedPattern)>,
    conditions: HashMap<ConditionId, ConditionRow>,
    completions: HashMap<CompletionId, Completion>,
    exceptions: HashMap<(SeriesId, LocalDate), InstanceException>,
    links: HashMap<LinkId, Link>,
    relational_constraints: HashMap<RelationalConstraintId, RelationalConstraint>,
    reminders: HashMap<ReminderId, Reminder>,
    reminder_acks: HashMap<(ReminderId, LocalDate), LocalDateTime>,
    cycling_configs: HashMap<SeriesId, CyclingConfig>,
    adaptive_duration_configs: HashMap<SeriesId, AdaptiveDurationConfig>,
    tags_by_id: HashMap<TagId, Tag>,
    tags_by_name: HashMap<String, TagId>,
    series_tags: HashMap<SeriesId, HashSet<TagId>>,
    tag_series: HashMap<TagId, HashSet<SeriesId>>,
}

/// A single HashMap-backed in-memory store implementing every repository
/// trait at once, so it satisfies `domain::repositories::Adapter`.
#[derive(Debug, Default)]
pub struct InMemoryAdapter {
    state: State,
    next_id: u64,
    /// >0 while inside a `transaction` call; only the outermost call snapshots.
    depth: u32,
    snapshot: Option<State>,
}

impl InMemoryAdapter {
    pub fn new() -> Self {
        InMemoryAdapter::default()
    }

    fn mint<T: From<u64>>(&mut self) -> T {
        self.next_id += 1;
        T::from(self.next_id)
    }

    /// Ids visited walking up `parentId` pointers starting at (and
    /// including) `start`. Used both to detect existing corruption and to
    /// check whether re-parenting a row to `start` would create a cycle.
    fn condition_ancestors(&self, start: ConditionId) -> HashSet<ConditionId> {
        let mut seen = HashSet::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            current = self.state.conditions.get(&id).and_then(|row| row.parent_id);
        }
        seen
    }

    fn delete_condition_subtree(&mut self, id: ConditionId) {
        let children: Vec<ConditionId> = self
            .state
            .conditions
            .values()
            .filter(|r| r.parent_id == Some(id))
            .map(|r| r.id)
            .collect();
        for child in children {
            self.delete_condition_subtree(child);
        }
        self.state.conditions.remove(&id);
    }

    fn resolve_tag(&self, name: &str) -> Option<TagId> {
        self.state.tags_by_name.get(name).copied()
    }

    fn series_ids_for_target(&self, target: &Target) -> Vec<SeriesId> {
        match target {
            Target::Series(id) => vec![*id],
            Target::Tag(name) => self
                .resolve_tag(name)
                .map(|tag_id| {
                    self.state
                        .tag_series
                        .get(&tag_id)
                        .map(|set| set.iter().copied().collect())
                        .unwrap_or_default()
                })
                .unwrap_or_default(),
        }
    }
}

macro_rules! from_u64 {
    ($name:ident) => {
        impl From<u64> for crate::domain::entities::$name {
            fn from(v: u64) -> Self {
                crate::domain::entities::$name(v)
            }
        }
    };
}

from_u64!(SeriesId);
from_u64!(PatternId);
from_u64!(ConditionId);
from_u64!(ExceptionId);
from_u64!(LinkId);
from_u64!(RelationalConstraintId);
from_u64!(CompletionId);
from_u64!(ReminderId);
from_u64!(TagId);

impl SeriesRepository for InMemoryAdapter {
    fn create(&mut self, mut series: Series) -> Result<SeriesId, CoreError> {
        series.validate()?;
        let id = self.mint::<SeriesId>();
        series.id = id;
        trace!(series_id = %id, "created series");
        self.state.series.insert(id, series);
        Ok(id)
    }

    fn get(&self, id: SeriesId) -> Result<Series, CoreError> {
        self.state
            .series
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFoundError(format!("series {id} not found")))
    }

    fn update(&mut self, series: Series) -> Result<(), CoreError> {
        series.validate()?;
        if !self.state.series.contains_key(&series.id) {
            return Err(CoreError::NotFoundError(format!("series {} not found", series.id)));
        }
        self.state.series.insert(series.id, series);
        Ok(())
    }

    fn delete(&mut self, id: SeriesId) -> Result<(), CoreError> {
        if !self.state.series.contains_key(&id) {
            return Err(CoreError::NotFoundError(format!("series {id} not found")));
        }
        let has_completions = self.state.completions.values().any(|c| c.series_id == id);
        let is_link_parent = self.state.links.values().any(|l| l.parent_series_id == id);
        if has_completions || is_link_parent {
            return Err(CoreError::ValidationError(format!(
                "series {id}: restricted from deletion (has completions or is a link parent)"
            )));
        }

        let pattern_ids: Vec<PatternId> = self
            .state
            .patterns
            .iter()
            .filter(|(_, (sid, _))| *sid == id)
            .map(|(pid, _)| *pid)
            .collect();
        for pid in pattern_ids {
            self.state.patterns.remove(&pid);
        }

        let condition_ids: Vec<ConditionId> = self
            .state
            .conditions
            .values()
            .filter(|row| row.series_id == id)
            .map(|row| row.id)
            .collect();
        for cid in condition_ids {
            self.state.conditions.remove(&cid);
        }

        self.state.exceptions.retain(|(sid, _), _| *sid != id);

        let link_ids: Vec<LinkId> = self
            .state
            .links
            .iter()
            .filter(|(_, l)| l.child_series_id == id)
            .map(|(lid, _)| *lid)
            .collect();
        for lid in link_ids {
            self.state.links.remove(&lid);
        }

        let reminder_ids: Vec<ReminderId> = self
            .state
            .reminders
            .iter()
            .filter(|(_, r)| r.series_id == id)
            .map(|(rid, _)| *rid)
            .collect();
        for rid in reminder_ids {
            self.state.reminders.remove(&rid);
            self.state.reminder_acks.retain(|(reminder_id, _), _| *reminder_id != rid);
        }

        if let Some(tags) = self.state.series_tags.remove(&id) {
            for tag_id in tags {
                if let Some(series) = self.state.tag_series.get_mut(&tag_id) {
                    series.remove(&id);
                }
            }
        }

        self.state.cycling_configs.remove(&id);
        self.state.adaptive_duration_configs.remove(&id);
        self.state.series.remove(&id);
        Ok(())
    }

    fn get_all(&self) -> Vec<Series> {
        self.state.series.values().cloned().collect()
    }

    fn get_by_tag(&self, tag: &str) -> Vec<Series> {
        let Some(tag_id) = self.resolve_tag(tag) else {
            return Vec::new();
        };
        self.state
            .tag_series
            .get(&tag_id)
            .into_iter()
            .flatten()
            .filter_map(|sid| self.state.series.get(sid).cloned())
            .collect()
    }
}

impl PatternRepository for InMemoryAdapter {
    fn create(&mut self, series_id: SeriesId, pattern: GuardedPattern) -> Result<PatternId, CoreError> {
        if !self.state.series.contains_key(&series_id) {
            return Err(CoreError::ForeignKeyError(format!("series {series_id} not found")));
        }
        let id = self.mint::<PatternId>();
        self.state.patterns.insert(id, (series_id, pattern));
        Ok(id)
    }

    fn get(&self, id: PatternId) -> Result<GuardedPattern, CoreError> {
        self.state
            .patterns
            .get(&id)
            .map(|(_, pattern)| pattern.clone())
            .ok_or_else(|| CoreError::NotFoundError(format!("pattern {id} not found")))
    }

    fn delete(&mut self, id: PatternId) -> Result<(), CoreError> {
        self.state
            .patterns
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFoundError(format!("pattern {id} not found")))
    }

    fn list_by_series(&self, series_id: SeriesId) -> Vec<(PatternId, GuardedPattern)> {
        let mut rows: Vec<(PatternId, GuardedPattern)> = self
            .state
            .patterns
            .iter()
            .filter(|(_, (sid, _))| *sid == series_id)
            .map(|(pid, (_, pattern))| (*pid, pattern.clone()))
            .collect();
        rows.sort_by_key(|(pid, _)| pid.0);
        rows
    }

    fn set_weekdays(
        &mut self,
        id: PatternId,
        weekdays: std::collections::BTreeSet<crate::domain::value_objects::Weekday>,
    ) -> Result<(), CoreError> {
        if weekdays.is_empty() {
            return Err(CoreError::InvalidPatternError(
                "weekdays requires a nonempty set".to_string(),
            ));
        }
        let (_, guarded) = self
            .state
            .patterns
            .get_mut(&id)
            .ok_or_else(|| CoreError::NotFoundError(format!("pattern {id} not found")))?;
        match &mut guarded.pattern {
            crate::domain::entities::Pattern::Weekly { days_of_week } => {
                *days_of_week = Some(weekdays);
            }
            crate::domain::entities::Pattern::Weekdays { days } => {
                *days = weekdays;
            }
            _ => {
                return Err(CoreError::ValidationError(format!(
                    "pattern {id} has no weekday set to replace"
                )))
            }
        }
        Ok(())
    }
}

impl ConditionRepository for InMemoryAdapter {
    fn create(&mut self, mut row: ConditionRow) -> Result<ConditionId, CoreError> {
        if let Some(parent_id) = row.parent_id {
            if !self.state.conditions.contains_key(&parent_id) {
                return Err(CoreError::ForeignKeyError(format!(
                    "condition parent {parent_id} not found"
                )));
            }
        }
        let id = self.mint::<ConditionId>();
        row.id = id;
        self.state.conditions.insert(id, row);
        Ok(id)
    }

    fn get(&self, id: ConditionId) -> Result<ConditionRow, CoreError> {
        self.state
            .conditions
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFoundError(format!("condition {id} not found")))
    }

    fn update(&mut self, row: ConditionRow) -> Result<(), CoreError> {
        if !self.state.conditions.contains_key(&row.id) {
            return Err(CoreError::NotFoundError(format!("condition {} not found", row.id)));
        }
        if let Some(parent_id) = row.parent_id {
            if !self.state.conditions.contains_key(&parent_id) {
                return Err(CoreError::ForeignKeyError(format!(
                    "condition parent {parent_id} not found"
                )));
            }
            if self.condition_ancestors(parent_id).contains(&row.id) {
                return Err(CoreError::InvalidDataError(format!(
                    "condition {}: setting parentId to {} would create a cycle",
                    row.id, parent_id
                )));
            }
        }
        self.state.conditions.insert(row.id, row);
        Ok(())
    }

    fn delete(&mut self, id: ConditionId) -> Result<(), CoreError> {
        if !self.state.conditions.contains_key(&id) {
            return Err(CoreError::NotFoundError(format!("condition {id} not found")));
        }
        self.delete_condition_subtree(id);
        Ok(())
    }

    fn list_by_series(&self, series_id: SeriesId) -> Vec<ConditionRow> {
        let mut rows: Vec<ConditionRow> = self
            .state
            .conditions
            .values()
            .filter(|row| row.series_id == series_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.id.0);
        rows
    }
}

impl CompletionRepository for InMemoryAdapter {
    fn create(&mut self, mut completion: Completion) -> Result<CompletionId, CoreError> {
        let duplicate = self
            .state
            .completions
            .values()
            .any(|c| c.series_id == completion.series_id && c.instance_date == completion.instance_date);
        if duplicate {
            return Err(CoreError::DuplicateKeyError(format!(
                "completion for series {} on {} already exists",
                completion.series_id, completion.instance_date
            )));
        }
        let id = self.mint::<CompletionId>();
        completion.id = id;
        self.state.completions.insert(id, completion);
        Ok(id)
    }

    fn delete(&mut self, id: CompletionId) -> Result<(), CoreError> {
        self.state
            .completions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFoundError(format!("completion {id} not found")))
    }

    fn list_by_series(&self, series_id: SeriesId) -> Vec<Completion> {
        self.state
            .completions
            .values()
            .filter(|c| c.series_id == series_id)
            .cloned()
            .collect()
    }

    fn get_by_instance(&self, series_id: SeriesId, instance_date: LocalDate) -> Option<Completion> {
        self.state
            .completions
            .values()
            .find(|c| c.series_id == series_id && c.instance_date == instance_date)
            .cloned()
    }
}

impl ExceptionRepository for InMemoryAdapter {
    fn upsert(&mut self, exception: InstanceException) -> Result<(), CoreError> {
        exception.validate()?;
        let key = (exception.series_id, exception.original_date);
        let mut exception = exception;
        if let Some(existing) = self.state.exceptions.get(&key) {
            exception.id = existing.id;
        } else if exception.id.0 == 0 {
            exception.id = self.mint::<ExceptionId>();
        }
        self.state.exceptions.insert(key, exception);
        Ok(())
    }

    fn get(&self, series_id: SeriesId, original_date: LocalDate) -> Option<InstanceException> {
        self.state.exceptions.get(&(series_id, original_date)).cloned()
    }

    fn list_by_series(&self, series_id: SeriesId) -> Vec<InstanceException> {
        self.state
            .exceptions
            .values()
            .filter(|e| e.series_id == series_id)
            .cloned()
            .collect()
    }

    fn list_in_range(&self, series_id: SeriesId, start: LocalDate, end: LocalDate) -> Vec<InstanceException> {
        self.state
            .exceptions
            .values()
            .filter(|e| e.series_id == series_id && e.original_date >= start && e.original_date < end)
            .cloned()
            .collect()
    }

    fn delete(&mut self, series_id: SeriesId, original_date: LocalDate) -> Result<(), CoreError> {
        self.state
            .exceptions
            .remove(&(series_id, original_date))
            .map(|_| ())
            .ok_or_else(|| {
                CoreError::NotFoundError(format!("no exception for series {series_id} on {original_date}"))
            })
    }
}

impl LinkRepository for InMemoryAdapter {
    fn create(&mut self, mut link: Link) -> Result<LinkId, CoreError> {
        let existing_links: Vec<Link> = self.state.links.values().copied().collect();
        crate::application::services::link_service::validate_new_link(
            &existing_links,
            link.parent_series_id,
            link.child_series_id,
            |id| self.state.series.contains_key(&id),
        )?;
        let id = self.mint::<LinkId>();
        link.id = id;
        self.state.links.insert(id, link);
        Ok(id)
    }

    fn get(&self, id: LinkId) -> Result<Link, CoreError> {
        self.state
            .links
            .get(&id)
            .copied()
            .ok_or_else(|| CoreError::NotFoundError(format!("link {id} not found")))
    }

    fn update(&mut self, link: Link) -> Result<(), CoreError> {
        let existing = self
            .state
            .links
            .get(&link.id)
            .ok_or_else(|| CoreError::NotFoundError(format!("link {} not found", link.id)))?;
        if existing.parent_series_id != link.parent_series_id || existing.child_series_id != link.child_series_id {
            return Err(CoreError::ValidationError(format!(
                "link {}: parentSeriesId/childSeriesId are immutable",
                link.id
            )));
        }
        self.state.links.insert(link.id, link);
        Ok(())
    }

    fn delete(&mut self, id: LinkId) -> Result<(), CoreError> {
        self.state
            .links
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFoundError(format!("link {id} not found")))
    }

    fn all(&self) -> Vec<Link> {
        self.state.links.values().copied().collect()
    }

    fn child_link(&self, child: SeriesId) -> Option<Link> {
        self.state.links.values().find(|l| l.child_series_id == child).copied()
    }

    fn parent_links(&self, parent: SeriesId) -> Vec<Link> {
        self.state
            .links
            .values()
            .filter(|l| l.parent_series_id == parent)
            .copied()
            .collect()
    }
}

impl RelationalConstraintRepository for InMemoryAdapter {
    fn create(&mut self, mut constraint: RelationalConstraint) -> Result<RelationalConstraintId, CoreError> {
        let id = self.mint::<RelationalConstraintId>();
        constraint.id = id;
        self.state.relational_constraints.insert(id, constraint);
        Ok(id)
    }

    fn get(&self, id: RelationalConstraintId) -> Result<RelationalConstraint, CoreError> {
        self.state
            .relational_constraints
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFoundError(format!("relational constraint {id} not found")))
    }

    fn update(&mut self, constraint: RelationalConstraint) -> Result<(), CoreError> {
        if !self.state.relational_constraints.contains_key(&constraint.id) {
            return Err(CoreError::NotFoundError(format!(
                "relational constraint {} not found",
                constraint.id
            )));
        }
        self.state.relational_constraints.insert(constraint.id, constraint);
        Ok(())
    }

    fn delete(&mut self, id: RelationalConstraintId) -> Result<(), CoreError> {
        self.state
            .relational_constraints
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFoundError(format!("relational constraint {id} not found")))
    }

    fn all(&self) -> Vec<RelationalConstraint> {
        self.state.relational_constraints.values().cloned().collect()
    }
}

impl ReminderRepository for InMemoryAdapter {
    fn create(&mut self, mut reminder: Reminder) -> Result<ReminderId, CoreError> {
        let id = self.mint::<ReminderId>();
        reminder.id = id;
        self.state.reminders.insert(id, reminder);
        Ok(id)
    }

    fn get(&self, id: ReminderId) -> Result<Reminder, CoreError> {
        self.state
            .reminders
            .get(&id)
            .copied()
            .ok_or_else(|| CoreError::NotFoundError(format!("reminder {id} not found")))
    }

    fn update(&mut self, reminder: Reminder) -> Result<(), CoreError> {
        if !self.state.reminders.contains_key(&reminder.id) {
            return Err(CoreError::NotFoundError(format!("reminder {} not found", reminder.id)));
        }
        self.state.reminders.insert(reminder.id, reminder);
        Ok(())
    }

    fn delete(&mut self, id: ReminderId) -> Result<(), CoreError> {
        self.state
            .reminders
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFoundError(format!("reminder {id} not found")))?;
        self.state.reminder_acks.retain(|(reminder_id, _), _| *reminder_id != id);
        Ok(())
    }

    fn list_by_series(&self, series_id: SeriesId) -> Vec<Reminder> {
        self.state
            .reminders
            .values()
            .filter(|r| r.series_id == series_id)
            .copied()
            .collect()
    }

    fn ack(&mut self, ack: ReminderAck) -> Result<(), CoreError> {
        let key = (ack.reminder_id, ack.instance_date);
        if self.state.reminder_acks.contains_key(&key) {
            return Err(CoreError::DuplicateKeyError(format!(
                "reminder {} already acked for {}",
                ack.reminder_id, ack.instance_date
            )));
        }
        self.state.reminder_acks.insert(key, ack.acked_at);
        Ok(())
    }

    fn is_acked(&self, reminder_id: ReminderId, instance_date: LocalDate) -> bool {
        self.state.reminder_acks.contains_key(&(reminder_id, instance_date))
    }

    fn purge_old_acks(&mut self, as_of: LocalDate) -> usize {
        let before = self.state.reminder_acks.len();
        self.state.reminder_acks.retain(|(_, date), _| *date >= as_of);
        before - self.state.reminder_acks.len()
    }
}

impl CyclingConfigRepository for InMemoryAdapter {
    fn get(&self, series_id: SeriesId) -> Option<CyclingConfig> {
        self.state.cycling_configs.get(&series_id).cloned()
    }

    fn set(&mut self, config: Option<CyclingConfig>, series_id: SeriesId) -> Result<(), CoreError> {
        match config {
            None => {
                self.state.cycling_configs.remove(&series_id);
            }
            Some(config) => {
                if config.series_id != series_id {
                    return Err(CoreError::ValidationError(format!(
                        "cycling config seriesId {} does not match {series_id}",
                        config.series_id
                    )));
                }
                self.state.cycling_configs.insert(series_id, config);
            }
        }
        Ok(())
    }
}

impl AdaptiveDurationConfigRepository for InMemoryAdapter {
    fn get(&self, series_id: SeriesId) -> Option<AdaptiveDurationConfig> {
        self.state.adaptive_duration_configs.get(&series_id).copied()
    }

    fn set(&mut self, config: Option<AdaptiveDurationConfig>, series_id: SeriesId) -> Result<(), CoreError> {
        match config {
            None => {
                self.state.adaptive_duration_configs.remove(&series_id);
            }
            Some(config) => {
                if config.series_id != series_id {
                    return Err(CoreError::ValidationError(format!(
                        "adaptive duration config seriesId {} does not match {series_id}",
                        config.series_id
                    )));
                }
                self.state.adaptive_duration_configs.insert(series_id, config);
            }
        }
        Ok(())
    }
}

impl TagRepository for InMemoryAdapter {
    fn create_idempotent(&mut self, name: &str) -> TagId {
        if let Some(id) = self.state.tags_by_name.get(name) {
            return *id;
        }
        let id = self.mint::<TagId>();
        self.state.tags_by_id.insert(id, Tag { id, name: name.to_string() });
        self.state.tags_by_name.insert(name.to_string(), id);
        id
    }

    fn add_association(&mut self, series_id: SeriesId, tag_id: TagId) -> Result<(), CoreError> {
        if !self.state.tags_by_id.contains_key(&tag_id) {
            return Err(CoreError::ForeignKeyError(format!("tag {tag_id} not found")));
        }
        self.state.series_tags.entry(series_id).or_default().insert(tag_id);
        self.state.tag_series.entry(tag_id).or_default().insert(series_id);
        Ok(())
    }

    fn remove_association(&mut self, series_id: SeriesId, tag_id: TagId) -> Result<(), CoreError> {
        if let Some(tags) = self.state.series_tags.get_mut(&series_id) {
            tags.remove(&tag_id);
        }
        if let Some(series) = self.state.tag_series.get_mut(&tag_id) {
            series.remove(&series_id);
        }
        Ok(())
    }

    fn tags_for_series(&self, series_id: SeriesId) -> Vec<Tag> {
        self.state
            .series_tags
            .get(&series_id)
            .into_iter()
            .flatten()
            .filter_map(|tag_id| self.state.tags_by_id.get(tag_id).cloned())
            .collect()
    }

    fn series_for_tag(&self, tag_id: TagId) -> Vec<SeriesId> {
        self.state
            .tag_series
            .get(&tag_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl TransactionManager for InMemoryAdapter {
    fn transaction<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, CoreError>) -> Result<T, CoreError> {
        let is_outermost = self.depth == 0;
        if is_outermost {
            self.snapshot = Some(self.state.clone());
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        if is_outermost {
            match &result {
                Ok(_) => self.snapshot = None,
                Err(_) => {
                    if let Some(snapshot) = self.snapshot.take() {
                        self.state = snapshot;
                    }
                }
            }
        }
        result
    }
}

impl CompletionStore for InMemoryAdapter {
    fn completions_in_window(&self, target: &Target, window_start: LocalDate, window_end: LocalDate) -> Vec<Completion> {
        let series_ids = self.series_ids_for_target(target);
        self.state
            .completions
            .values()
            .filter(|c| series_ids.contains(&c.series_id))
            .filter(|c| c.instance_date >= window_start && c.instance_date <= window_end)
            .cloned()
            .collect()
    }

    fn last_completion(&self, target: &Target) -> Option<Completion> {
        let series_ids = self.series_ids_for_target(target);
        self.state
            .completions
            .values()
            .filter(|c| series_ids.contains(&c.series_id))
            .max_by_key(|c| c.instance_date)
            .cloned()
    }
}
