//! Link / chain model (§3, §4.E)
//!
//! Graph-shaped invariants over the parent→child chain (acyclic, one
//! incoming link per child, bounded depth) are checked against the whole
//! link set here, grounded on the same `petgraph` cycle-detection machinery
//! the teacher uses in `DependencyAnalyzer` for job dependency graphs.
//! Derived per-instance queries (`calculateChildTarget`,
//! `getChildValidWindow`, `detectConflicts`) are plain functions over a
//! single link plus its parent's state.

use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::domain::entities::{
    Completion, Instance, InstanceException, Link, LinkId, Series, SeriesId, MAX_CHAIN_LENGTH,
};
use crate::domain::errors::CoreError;
use crate::domain::value_objects::calendar::make_date_time;
use crate::domain::value_objects::LocalDate;

/// `linkSeries({parent, child, targetDistance, earlyWobble, lateWobble})`
/// (§4.E). `existing_links` is the whole current link set (used to check
/// cycles and chain depth); `series_exists` lets the caller answer
/// `NotFoundError` without handing this function a full repository.
pub fn validate_new_link(
    existing_links: &[Link],
    parent: SeriesId,
    child: SeriesId,
    series_exists: impl Fn(SeriesId) -> bool,
) -> Result<(), CoreError> {
    if parent == child {
        return Err(CoreError::SelfLinkError(format!("series {parent}")));
    }
    if !series_exists(parent) {
        return Err(CoreError::NotFoundError(format!("series {parent}")));
    }
    if !series_exists(child) {
        return Err(CoreError::NotFoundError(format!("series {child}")));
    }
    if existing_links.iter().any(|l| l.child_series_id == child) {
        return Err(CoreError::AlreadyLinkedError(format!("series {child}")));
    }

    let mut graph: DiGraph<SeriesId, ()> = DiGraph::new();
    let mut nodes: HashMap<SeriesId, NodeIndex> = HashMap::new();
    let mut node_of = |g: &mut DiGraph<SeriesId, ()>, id: SeriesId, nodes: &mut HashMap<SeriesId, NodeIndex>| {
        *nodes.entry(id).or_insert_with(|| g.add_node(id))
    };
    for link in existing_links {
        let p = node_of(&mut graph, link.parent_series_id, &mut nodes);
        let c = node_of(&mut graph, link.child_series_id, &mut nodes);
        graph.add_edge(p, c, ());
    }
    let child_idx = node_of(&mut graph, child, &mut nodes);
    let parent_idx = node_of(&mut graph, parent, &mut nodes);

    // Adding parent -> child would create a cycle iff child already reaches
    // parent in the existing graph.
    if has_path_connecting(&graph, child_idx, parent_idx, None) {
        return Err(CoreError::CycleDetectedError(format!(
            "linking {parent} -> {child} would create a cycle"
        )));
    }

    let depth_above_parent = chain_length_above(existing_links, parent);
    if depth_above_parent + 1 > MAX_CHAIN_LENGTH {
        return Err(CoreError::ChainDepthExceededError(format!(
            "chain above {parent} already has depth {depth_above_parent}"
        )));
    }

    Ok(())
}

/// Number of parent hops above `series` in the existing link graph.
fn chain_length_above(links: &[Link], series: SeriesId) -> usize {
    let by_child: HashMap<SeriesId, SeriesId> = links
        .iter()
        .map(|l| (l.child_series_id, l.parent_series_id))
        .collect();
    let mut depth = 0;
    let mut current = series;
    let mut seen = std::collections::HashSet::new();
    while let Some(&parent) = by_child.get(&current) {
        if !seen.insert(current) {
            break; // guard against an already-corrupt graph; validate_new_link prevents new cycles
        }
        depth += 1;
        current = parent;
        if depth > MAX_CHAIN_LENGTH + 1 {
            break;
        }
    }
    depth
}

/// `update` rejects changes to `parentSeriesId`/`childSeriesId` (§4.E).
pub fn validate_link_update(existing: &Link, updated: &Link) -> Result<(), CoreError> {
    if existing.parent_series_id != updated.parent_series_id
        || existing.child_series_id != updated.child_series_id
    {
        return Err(CoreError::ValidationError(format!(
            "link {}: parentSeriesId/childSeriesId are immutable",
            existing.id
        )));
    }
    Ok(())
}

/// `parentEnd(parent, instanceDate)` (§4.E): the parent's completion end
/// time on `instanceDate` if one exists; else its rescheduled time plus
/// duration if an exception reschedules it; else its ideal time plus
/// duration.
pub fn parent_end(
    parent: &Series,
    instance_date: LocalDate,
    parent_completion: Option<&Completion>,
    parent_exception: Option<&InstanceException>,
) -> crate::domain::value_objects::LocalDateTime {
    if let Some(completion) = parent_completion {
        if let Some(end_time) = completion.end_time {
            return make_date_time(instance_date, end_time);
        }
    }
    let duration_minutes = parent.duration.map(|m| m.value()).unwrap_or(0) as i64;
    if let Some(exception) = parent_exception {
        if exception.exception_type == crate::domain::entities::ExceptionType::Rescheduled {
            let new_time = exception.new_time.expect("rescheduled exceptions carry newTime");
            return new_time + chrono::Duration::minutes(duration_minutes);
        }
    }
    make_date_time(instance_date, parent.effective_time()) + chrono::Duration::minutes(duration_minutes)
}

/// `calculateChildTarget(child, instanceDate)` (§4.E).
pub fn calculate_child_target(
    link: &Link,
    parent: &Series,
    instance_date: LocalDate,
    parent_completion: Option<&Completion>,
    parent_exception: Option<&InstanceException>,
) -> crate::domain::value_objects::LocalDateTime {
    parent_end(parent, instance_date, parent_completion, parent_exception)
        + chrono::Duration::minutes(i64::from(link.target_distance.value()))
}

/// `getChildValidWindow(child, date)` (§4.E): `[target - earlyWobble, target + lateWobble]`.
pub fn child_valid_window(
    link: &Link,
    target: crate::domain::value_objects::LocalDateTime,
) -> (crate::domain::value_objects::LocalDateTime, crate::domain::value_objects::LocalDateTime) {
    let start = target - chrono::Duration::minutes(i64::from(link.early_wobble.value()));
    let end = target + chrono::Duration::minutes(i64::from(link.late_wobble.value()));
    (start, end)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainBoundsViolated {
    pub link_id: LinkId,
    pub proposed_time: crate::domain::value_objects::LocalDateTime,
    pub window: (crate::domain::value_objects::LocalDateTime, crate::domain::value_objects::LocalDateTime),
}

/// `detectConflicts(child, date, proposedTime)` (§4.E): yields a
/// `chainBoundsViolated` conflict when `proposedTime` falls outside the
/// valid window.
pub fn detect_conflicts(
    link: &Link,
    parent: &Series,
    instance_date: LocalDate,
    proposed_time: crate::domain::value_objects::LocalDateTime,
    parent_completion: Option<&Completion>,
    parent_exception: Option<&InstanceException>,
) -> Option<ChainBoundsViolated> {
    let target = calculate_child_target(link, parent, instance_date, parent_completion, parent_exception);
    let window = child_valid_window(link, target);
    if proposed_time < window.0 || proposed_time > window.1 {
        Some(ChainBoundsViolated { link_id: link.id, proposed_time, window })
    } else {
        None
    }
}

/// Chain depth of an instance within the current reflow instance set (§4.I
/// phase 5, variable-ordering rule 2): walks `parentId` upward with a
/// cycle-guard over the set actually present in this reflow run.
pub fn chain_depth(instances: &[Instance], index: usize) -> usize {
    let by_series: HashMap<SeriesId, usize> =
        instances.iter().enumerate().map(|(i, inst)| (inst.series_id, i)).collect();
    let mut depth = 0;
    let mut current = index;
    let mut seen = std::collections::HashSet::new();
    while let Some(parent_id) = instances[current].parent.map(|p| p.parent_series_id) {
        if !seen.insert(current) {
            break;
        }
        match by_series.get(&parent_id) {
            Some(&parent_idx) => {
                depth += 1;
                current = parent_idx;
            }
            None => break,
        }
    }
    depth
}
