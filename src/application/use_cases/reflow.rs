//! Reflow — the CSP solver (§4.I) and conflict reporter (§4.J)
//!
//! The heart of the core: a strict six-phase pipeline that turns a batch of
//! series into concrete assignments. Generation (phase 1) and partitioning
//! (phase 2) are plain data transforms; domain construction (phase 3),
//! arc-consistency (phase 4.5) and backtracking (phase 5) are where the
//! actual solving happens. Phase 6 is the no-solution fallback — reflow
//! never raises on unsolvability (§7), it degrades to best-effort placement
//! plus a conflict list.

use std::collections::{BTreeSet, HashMap, VecDeque};

use tracing::{info, warn};

use crate::domain::entities::{ChainRef, Instance, Link, SeriesId, ShiftWindow, TimeWindow};
use crate::domain::value_objects::calendar::{add_days, make_date_time, minutes_between};
use crate::domain::value_objects::{LocalDate, LocalDateTime, LocalTime, Minutes};

/// Per-series input to reflow (§4.I).
#[derive(Debug, Clone)]
pub struct ReflowSeriesInput {
    pub series_id: SeriesId,
    /// The series' ideal time-of-day, combined with each generated
    /// instance's date.
    pub ideal_time: LocalDateTime,
    pub duration: Minutes,
    pub days_before: u32,
    pub days_after: u32,
    pub time_window: Option<TimeWindow>,
    pub fixed: bool,
    pub all_day: bool,
    /// How many consecutive daily occurrences to emit in this window.
    pub count: u32,
    pub cancelled: bool,
    pub rescheduled_to: Option<LocalDateTime>,
    pub condition_satisfied: bool,
}

#[derive(Debug, Clone)]
pub struct ReflowInput {
    pub series: Vec<ReflowSeriesInput>,
    /// Resolved `mustBeBefore(first, second)` pairs, by series id.
    pub must_be_before: Vec<(SeriesId, SeriesId)>,
    pub links: Vec<Link>,
    /// Optional per-date workload bias for value ordering.
    pub workload: HashMap<LocalDate, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub series_id: SeriesId,
    pub time: LocalDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflowOutput {
    pub assignments: Vec<Assignment>,
    pub conflicts: Vec<Conflict>,
}

/// Runs the full six-phase reflow pipeline (§4.I).
pub fn reflow(input: &ReflowInput) -> ReflowOutput {
    info!(series = input.series.len(), "reflow phase 1: generating instances");
    let instances = generate_instances(input);

    info!(instances = instances.len(), "reflow phase 2: partitioning all-day vs timed");
    let (all_day, timed): (Vec<Instance>, Vec<Instance>) =
        instances.into_iter().partition(|i| i.all_day);

    if timed.is_empty() {
        return ReflowOutput {
            assignments: all_day.iter().map(|i| Assignment { series_id: i.series_id, time: i.ideal_time }).collect(),
            conflicts: Vec::new(),
        };
    }

    info!(timed = timed.len(), "reflow phase 3: constructing domains");
    let parent_lookup = build_parent_lookup(&timed);
    let mut domains: Vec<BTreeSet<LocalDateTime>> =
        timed.iter().map(|inst| domain_for(inst, &parent_lookup)).collect();

    let constraints = build_constraints(&timed, input);

    info!(constraints = constraints.len(), "reflow phase 4.5: running AC-3");
    let ac3_ok = run_ac3(&timed, &mut domains, &constraints);

    let solution = if ac3_ok {
        info!("reflow phase 5: backtracking search");
        backtrack(&timed, &domains, &constraints, &input.workload)
    } else {
        None
    };

    match solution {
        Some(assignment) => {
            let mut assignments: Vec<Assignment> = timed
                .iter()
                .enumerate()
                .map(|(i, inst)| Assignment { series_id: inst.series_id, time: assignment[i] })
                .collect();
            assignments.extend(all_day.iter().map(|i| Assignment { series_id: i.series_id, time: i.ideal_time }));
            ReflowOutput { assignments, conflicts: Vec::new() }
        }
        None => {
            warn!("reflow phase 6: no solution found, falling back to best-effort placement");
            phase6_fallback(&timed, &all_day, &domains, &constraints)
        }
    }
}

// ---------------------------------------------------------------- phase 1

fn generate_instances(input: &ReflowInput) -> Vec<Instance> {
    let mut out = Vec::new();
    for s in &input.series {
        if s.cancelled || !s.condition_satisfied {
            continue;
        }
        for n in 0..s.count {
            let ideal_time = if n == 0 {
                s.rescheduled_to.unwrap_or(s.ideal_time)
            } else {
                make_date_time(add_days(s.ideal_time.date(), i64::from(n)), s.ideal_time.time())
            };
            out.push(Instance {
                series_id: s.series_id,
                fixed: s.fixed,
                ideal_time,
                duration: s.duration,
                shift_window: ShiftWindow { days_before: s.days_before, days_after: s.days_after },
                time_window: s.time_window,
                all_day: s.all_day,
                parent: None,
            });
        }
    }

    // Attach chain metadata: pair the Nth generated instance of a child
    // series with the Nth generated instance of its linked parent.
    let mut by_series: HashMap<SeriesId, Vec<usize>> = HashMap::new();
    for (idx, inst) in out.iter().enumerate() {
        by_series.entry(inst.series_id).or_default().push(idx);
    }
    for link in &input.links {
        let Some(parent_indices) = by_series.get(&link.parent_series_id).cloned() else { continue };
        let Some(child_indices) = by_series.get(&link.child_series_id).cloned() else { continue };
        for (p, c) in parent_indices.iter().zip(child_indices.iter()) {
            out[*c].parent = Some(ChainRef {
                parent_series_id: link.parent_series_id,
                chain_distance: link.target_distance,
                early_wobble: link.early_wobble,
                late_wobble: link.late_wobble,
            });
            let _ = p; // parent index itself isn't stored on the child; looked up by series id at domain-build time
        }
    }
    out
}

// ---------------------------------------------------------------- phase 3

/// series_id -> (ideal_time, duration) of its first generated timed instance,
/// used to compute a chain child's domain window.
fn build_parent_lookup(timed: &[Instance]) -> HashMap<SeriesId, (LocalDateTime, Minutes)> {
    let mut out = HashMap::new();
    for inst in timed {
        out.entry(inst.series_id).or_insert((inst.ideal_time, inst.duration));
    }
    out
}

const GRID_MINUTES: i64 = 5;

fn domain_for(instance: &Instance, parents: &HashMap<SeriesId, (LocalDateTime, Minutes)>) -> BTreeSet<LocalDateTime> {
    if instance.fixed {
        let mut set = BTreeSet::new();
        set.insert(instance.ideal_time);
        return set;
    }

    if let Some(chain) = &instance.parent {
        if let Some(&(parent_ideal, parent_duration)) = parents.get(&chain.parent_series_id) {
            let target = parent_ideal
                + chrono::Duration::minutes(i64::from(parent_duration.value()))
                + chrono::Duration::minutes(i64::from(chain.chain_distance.value()));
            let start = target - chrono::Duration::minutes(i64::from(chain.early_wobble.value()));
            let end = target + chrono::Duration::minutes(i64::from(chain.late_wobble.value()));
            return five_minute_range(start, end);
        }
        return BTreeSet::new();
    }

    let ideal_date = instance.ideal_date();
    let mut out = BTreeSet::new();
    let first = add_days(ideal_date, -(i64::from(instance.shift_window.days_before)));
    let last = add_days(ideal_date, i64::from(instance.shift_window.days_after));
    let mut d = first;
    while d <= last {
        match instance.time_window {
            Some(TimeWindow { start, end }) => {
                out.extend(five_minute_range(make_date_time(d, start), make_date_time(d, end)));
            }
            None => {
                out.extend(five_minute_range(
                    make_date_time(d, LocalTime::from_hms_opt(0, 0, 0).unwrap()),
                    make_date_time(d, LocalTime::from_hms_opt(23, 55, 0).unwrap()),
                ));
            }
        }
        d = add_days(d, 1);
    }
    out
}

fn five_minute_range(start: LocalDateTime, end: LocalDateTime) -> BTreeSet<LocalDateTime> {
    use chrono::Timelike;

    let mut out = BTreeSet::new();
    if start > end {
        return out;
    }
    let minutes_from_midnight = |dt: LocalDateTime| -> i64 {
        i64::from(dt.time().hour()) * 60 + i64::from(dt.time().minute())
    };
    let start_snapped_minutes = ((minutes_from_midnight(start) + GRID_MINUTES - 1) / GRID_MINUTES) * GRID_MINUTES;
    let start_offset = start_snapped_minutes - minutes_from_midnight(start);
    let mut cursor = start + chrono::Duration::minutes(start_offset);
    while cursor <= end {
        out.insert(cursor);
        cursor += chrono::Duration::minutes(GRID_MINUTES);
    }
    out
}

// ---------------------------------------------------------------- phase 4

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
    NoOverlap(usize, usize),
    MustBeBefore(usize, usize),
    Chain(usize, usize),
}

fn build_constraints(timed: &[Instance], input: &ReflowInput) -> Vec<Constraint> {
    let mut out = Vec::new();
    for i in 0..timed.len() {
        for j in (i + 1)..timed.len() {
            out.push(Constraint::NoOverlap(i, j));
        }
    }

    let index_of_first = |series_id: SeriesId| timed.iter().position(|i| i.series_id == series_id);
    for (first, second) in &input.must_be_before {
        if let (Some(fi), Some(si)) = (index_of_first(*first), index_of_first(*second)) {
            out.push(Constraint::MustBeBefore(fi, si));
        }
    }

    for link in &input.links {
        // Pair by generation order, same rule as `generate_instances`.
        let parent_positions: Vec<usize> = timed
            .iter()
            .enumerate()
            .filter(|(_, i)| i.series_id == link.parent_series_id)
            .map(|(idx, _)| idx)
            .collect();
        let child_positions: Vec<usize> = timed
            .iter()
            .enumerate()
            .filter(|(_, i)| i.series_id == link.child_series_id)
            .map(|(idx, _)| idx)
            .collect();
        for (p, c) in parent_positions.iter().zip(child_positions.iter()) {
            out.push(Constraint::Chain(*p, *c));
        }
    }
    out
}

// -------------------------------------------------------------- phase 4.5

fn run_ac3(timed: &[Instance], domains: &mut [BTreeSet<LocalDateTime>], constraints: &[Constraint]) -> bool {
    let mut arcs_by_target: HashMap<usize, Vec<(usize, Constraint)>> = HashMap::new();
    let mut queue: VecDeque<(usize, usize, Constraint)> = VecDeque::new();

    let mut push_arc = |queue: &mut VecDeque<(usize, usize, Constraint)>, x: usize, y: usize, c: Constraint| {
        queue.push_back((x, y, c));
    };

    for &c in constraints {
        match c {
            Constraint::NoOverlap(a, b) | Constraint::MustBeBefore(a, b) | Constraint::Chain(a, b) => {
                push_arc(&mut queue, a, b, c);
                push_arc(&mut queue, b, a, c);
                arcs_by_target.entry(a).or_default().push((b, c));
                arcs_by_target.entry(b).or_default().push((a, c));
            }
        }
    }

    while let Some((x, y, c)) = queue.pop_front() {
        if revise(timed, domains, x, y, c) {
            if domains[x].is_empty() {
                return false;
            }
            if let Some(neighbors) = arcs_by_target.get(&x) {
                for &(z, c2) in neighbors {
                    if z != y {
                        queue.push_back((z, x, c2));
                    }
                }
            }
        }
    }
    true
}

/// Revises `x`'s domain against `y` under constraint `c`. Returns whether
/// `x`'s domain changed.
fn revise(timed: &[Instance], domains: &mut [BTreeSet<LocalDateTime>], x: usize, y: usize, c: Constraint) -> bool {
    let y_domain = domains[y].clone();
    let before = domains[x].len();

    match c {
        Constraint::NoOverlap(a, b) => {
            let dy = timed[y].duration;
            domains[x].retain(|&v| {
                y_domain.iter().any(|&w| {
                    v < w || v >= w + chrono::Duration::minutes(i64::from(dy.value()))
                })
            });
            let _ = (a, b);
        }
        Constraint::MustBeBefore(first, second) => {
            if x == first {
                domains[x].retain(|&v| y_domain.iter().any(|&w| v < w));
            } else {
                debug_assert_eq!(x, second);
                domains[x].retain(|&v| y_domain.iter().any(|&w| w < v));
            }
        }
        Constraint::Chain(parent, child) => {
            if x == child {
                let dp = timed[parent].duration;
                let chain = timed[child].parent.expect("chain constraint implies a ChainRef");
                domains[x].retain(|&v| {
                    y_domain.iter().any(|&w| {
                        let target = w + chrono::Duration::minutes(i64::from(dp.value()))
                            + chrono::Duration::minutes(i64::from(chain.chain_distance.value()));
                        let lo = target - chrono::Duration::minutes(i64::from(chain.early_wobble.value()));
                        let hi = target + chrono::Duration::minutes(i64::from(chain.late_wobble.value()));
                        v >= lo && v <= hi
                    })
                });
            } else {
                debug_assert_eq!(x, parent);
                let dp = timed[parent].duration;
                let chain = timed[child].parent.expect("chain constraint implies a ChainRef");
                domains[x].retain(|&v| {
                    let target = v + chrono::Duration::minutes(i64::from(dp.value()))
                        + chrono::Duration::minutes(i64::from(chain.chain_distance.value()));
                    let lo = target - chrono::Duration::minutes(i64::from(chain.early_wobble.value()));
                    let hi = target + chrono::Duration::minutes(i64::from(chain.late_wobble.value()));
                    y_domain.iter().any(|&w| w >= lo && w <= hi)
                });
            }
        }
    }

    domains[x].len() != before
}

// ---------------------------------------------------------------- phase 5

fn backtrack(
    timed: &[Instance],
    domains: &[BTreeSet<LocalDateTime>],
    constraints: &[Constraint],
    workload: &HashMap<LocalDate, u32>,
) -> Option<Vec<LocalDateTime>> {
    let mut assignment: Vec<Option<LocalDateTime>> = vec![None; timed.len()];
    let mut working: Vec<BTreeSet<LocalDateTime>> = domains.to_vec();

    let chain_depths: Vec<usize> = (0..timed.len())
        .map(|i| crate::application::services::link_service::chain_depth(timed, i))
        .collect();

    if solve(timed, &mut working, constraints, &mut assignment, &chain_depths, workload) {
        Some(assignment.into_iter().map(|v| v.expect("fully assigned")).collect())
    } else {
        None
    }
}

fn select_unassigned(
    assignment: &[Option<LocalDateTime>],
    domains: &[BTreeSet<LocalDateTime>],
    timed: &[Instance],
    chain_depths: &[usize],
) -> Option<usize> {
    (0..timed.len())
        .filter(|&i| assignment[i].is_none())
        .min_by_key(|&i| (!timed[i].fixed, chain_depths[i], domains[i].len(), i))
}

fn solve(
    timed: &[Instance],
    domains: &mut Vec<BTreeSet<LocalDateTime>>,
    constraints: &[Constraint],
    assignment: &mut Vec<Option<LocalDateTime>>,
    chain_depths: &[usize],
    workload: &HashMap<LocalDate, u32>,
) -> bool {
    let Some(var) = select_unassigned(assignment, domains, timed, chain_depths) else {
        return true;
    };

    let mut candidates: Vec<LocalDateTime> = domains[var].iter().copied().collect();
    candidates.sort_by_key(|&v| {
        let dist = minutes_between(timed[var].ideal_time, v).abs();
        let score = workload.get(&v.date()).copied().unwrap_or(0);
        (dist, score, crate::domain::value_objects::calendar::format_date_time(v))
    });

    for v in candidates {
        if is_consistent(timed, constraints, assignment, var, v) {
            assignment[var] = Some(v);
            if solve(timed, domains, constraints, assignment, chain_depths, workload) {
                return true;
            }
            assignment[var] = None;
        }
    }
    false
}

fn is_consistent(
    timed: &[Instance],
    constraints: &[Constraint],
    assignment: &[Option<LocalDateTime>],
    var: usize,
    candidate: LocalDateTime,
) -> bool {
    for &c in constraints {
        match c {
            Constraint::NoOverlap(a, b) if a == var || b == var => {
                let other = if a == var { b } else { a };
                if let Some(other_time) = assignment[other] {
                    if intervals_overlap(
                        candidate,
                        timed[var].duration,
                        other_time,
                        timed[other].duration,
                    ) {
                        return false;
                    }
                }
            }
            Constraint::MustBeBefore(first, second) if first == var || second == var => {
                if first == var {
                    if let Some(second_time) = assignment[second] {
                        if !(candidate < second_time) {
                            return false;
                        }
                    }
                } else if let Some(first_time) = assignment[first] {
                    if !(first_time < candidate) {
                        return false;
                    }
                }
            }
            Constraint::Chain(parent, child) if parent == var || child == var => {
                if child == var {
                    if let Some(parent_time) = assignment[parent] {
                        if !within_chain_window(timed, parent, child, parent_time, candidate) {
                            return false;
                        }
                    }
                } else if let Some(child_time) = assignment[child] {
                    if !within_chain_window(timed, parent, child, candidate, child_time) {
                        return false;
                    }
                }
            }
            _ => {}
        }
    }
    true
}

fn intervals_overlap(a_start: LocalDateTime, a_dur: Minutes, b_start: LocalDateTime, b_dur: Minutes) -> bool {
    let a_end = a_start + chrono::Duration::minutes(i64::from(a_dur.value()));
    let b_end = b_start + chrono::Duration::minutes(i64::from(b_dur.value()));
    a_start < b_end && b_start < a_end
}

fn within_chain_window(
    timed: &[Instance],
    parent: usize,
    child: usize,
    parent_time: LocalDateTime,
    child_time: LocalDateTime,
) -> bool {
    let chain = timed[child].parent.expect("chain constraint implies a ChainRef");
    let target = parent_time
        + chrono::Duration::minutes(i64::from(timed[parent].duration.value()))
        + chrono::Duration::minutes(i64::from(chain.chain_distance.value()));
    let lo = target - chrono::Duration::minutes(i64::from(chain.early_wobble.value()));
    let hi = target + chrono::Duration::minutes(i64::from(chain.late_wobble.value()));
    child_time >= lo && child_time <= hi
}

// ---------------------------------------------------------------- phase 6

fn phase6_fallback(
    timed: &[Instance],
    all_day: &[Instance],
    domains: &[BTreeSet<LocalDateTime>],
    constraints: &[Constraint],
) -> ReflowOutput {
    let mut placed: Vec<LocalDateTime> = Vec::with_capacity(timed.len());
    for (i, inst) in timed.iter().enumerate() {
        if inst.fixed {
            placed.push(inst.ideal_time);
            continue;
        }
        let closest = domains[i]
            .iter()
            .min_by_key(|&&v| minutes_between(inst.ideal_time, v).abs())
            .copied()
            .unwrap_or(inst.ideal_time);
        placed.push(closest);
    }

    let mut conflicts = Vec::new();
    for &c in constraints {
        match c {
            Constraint::NoOverlap(a, b) => {
                if intervals_overlap(placed[a], timed[a].duration, placed[b], timed[b].duration) {
                    conflicts.push(Conflict {
                        severity: Severity::Warning,
                        message: format!(
                            "overlap between series {} at {} and series {} at {}",
                            timed[a].series_id,
                            crate::domain::value_objects::calendar::format_date_time(placed[a]),
                            timed[b].series_id,
                            crate::domain::value_objects::calendar::format_date_time(placed[b])
                        ),
                    });
                }
            }
            Constraint::MustBeBefore(first, second) => {
                if !(placed[first] < placed[second]) {
                    conflicts.push(Conflict {
                        severity: Severity::Error,
                        message: format!(
                            "constraint violation: series {} must be before series {}",
                            timed[first].series_id, timed[second].series_id
                        ),
                    });
                }
            }
            Constraint::Chain(parent, child) => {
                if domains[child].is_empty() {
                    conflicts.push(Conflict {
                        severity: Severity::Error,
                        message: format!("series {} cannot fit its chain window", timed[child].series_id),
                    });
                } else if !within_chain_window(timed, parent, child, placed[parent], placed[child]) {
                    conflicts.push(Conflict {
                        severity: Severity::Error,
                        message: format!("series {} cannot fit its chain window", timed[child].series_id),
                    });
                }
            }
        }
    }

    let chained_children: BTreeSet<usize> = constraints
        .iter()
        .filter_map(|c| if let Constraint::Chain(_, child) = c { Some(*child) } else { None })
        .collect();
    for (i, inst) in timed.iter().enumerate() {
        if !inst.fixed && !chained_children.contains(&i) && domains[i].is_empty() {
            conflicts.push(Conflict {
                severity: Severity::Warning,
                message: format!("series {} has no valid slot", inst.series_id),
            });
        }
    }

    let mut assignments: Vec<Assignment> = timed
        .iter()
        .zip(placed.iter())
        .map(|(inst, &time)| Assignment { series_id: inst.series_id, time })
        .collect();
    assignments.extend(all_day.iter().map(|i| Assignment { series_id: i.series_id, time: i.ideal_time }));

    ReflowOutput { assignments, conflicts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::calendar::{make_date, make_date_time, parse_time};

    fn series(id: u64, ideal: &str, duration: u32, fixed: bool) -> ReflowSeriesInput {
        ReflowSeriesInput {
            series_id: SeriesId(id),
            ideal_time: make_date_time(make_date(2024, 1, 15).unwrap(), parse_time(ideal).unwrap()),
            duration: Minutes::new(duration),
            days_before: 0,
            days_after: 0,
            time_window: None,
            fixed,
            all_day: false,
            count: 1,
            cancelled: false,
            rescheduled_to: None,
            condition_satisfied: true,
        }
    }

    #[test]
    fn s6_two_flexible_conflicting_instances_resolve() {
        let a = series(1, "09:00:00", 60, false);
        let b = series(2, "09:00:00", 60, false);
        let input = ReflowInput {
            series: vec![a, b],
            must_be_before: vec![],
            links: vec![],
            workload: HashMap::new(),
        };
        let out = reflow(&input);
        assert_eq!(out.assignments.len(), 2);
        assert!(out.conflicts.is_empty());
        let times: Vec<LocalDateTime> = out.assignments.iter().map(|a| a.time).collect();
        assert_ne!(times[0], times[1]);
        assert!(!intervals_overlap(times[0], Minutes::new(60), times[1], Minutes::new(60)));
    }

    #[test]
    fn s5_chain_child_lands_within_wobble() {
        let mut parent = series(1, "09:00:00", 60, true);
        parent.fixed = true;
        let mut child = series(2, "09:00:00", 30, false);
        child.time_window = Some(TimeWindow {
            start: parse_time("10:00:00").unwrap(),
            end: parse_time("12:00:00").unwrap(),
        });
        let link = Link::new(
            crate::domain::entities::LinkId(1),
            SeriesId(1),
            SeriesId(2),
            Minutes::new(30),
        )
        .with_wobble(Minutes::new(15), Minutes::new(15));

        let input = ReflowInput {
            series: vec![parent, child],
            must_be_before: vec![],
            links: vec![link],
            workload: HashMap::new(),
        };
        let out = reflow(&input);
        assert!(out.conflicts.is_empty());
        let parent_time = out.assignments.iter().find(|a| a.series_id == SeriesId(1)).unwrap().time;
        let child_time = out.assignments.iter().find(|a| a.series_id == SeriesId(2)).unwrap().time;
        assert_eq!(parent_time, make_date_time(make_date(2024, 1, 15).unwrap(), parse_time("09:00:00").unwrap()));
        let lo = make_date_time(make_date(2024, 1, 15).unwrap(), parse_time("10:15:00").unwrap());
        let hi = make_date_time(make_date(2024, 1, 15).unwrap(), parse_time("10:45:00").unwrap());
        assert!(child_time >= lo && child_time <= hi);
    }

    #[test]
    fn determinism_same_input_same_output() {
        let a = series(1, "09:00:00", 60, false);
        let b = series(2, "09:00:00", 60, false);
        let input = ReflowInput {
            series: vec![a, b],
            must_be_before: vec![],
            links: vec![],
            workload: HashMap::new(),
        };
        let out1 = reflow(&input);
        let out2 = reflow(&input);
        assert_eq!(out1, out2);
    }

    #[test]
    fn all_day_instances_bypass_the_solver() {
        let mut s = series(1, "00:00:00", 0, false);
        s.all_day = true;
        let input = ReflowInput { series: vec![s], must_be_before: vec![], links: vec![], workload: HashMap::new() };
        let out = reflow(&input);
        assert_eq!(out.assignments.len(), 1);
        assert!(out.conflicts.is_empty());
    }

    #[test]
    fn cancelled_series_produces_no_instance() {
        let mut s = series(1, "09:00:00", 30, true);
        s.cancelled = true;
        let input = ReflowInput { series: vec![s], must_be_before: vec![], links: vec![], workload: HashMap::new() };
        let out = reflow(&input);
        assert!(out.assignments.is_empty());
    }
}
