//! Link entity (§3, §4.E)
//!
//! A parent→child chain edge. Graph-shaped rules (acyclic, one incoming
//! link per child, depth <= 32) are checked against the *whole* link set,
//! so they live in `application::services::link_service`, grounded on the
//! same `petgraph` cycle/ordering machinery the teacher uses in
//! `DependencyAnalyzer` for job dependency graphs.

use serde::{Deserialize, Serialize};

use super::ids::{LinkId, SeriesId};
use crate::domain::value_objects::Minutes;

/// The link graph may chain at most this many parents above any node
/// (so total chain depth is at most `MAX_CHAIN_LENGTH + 1`).
pub const MAX_CHAIN_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub parent_series_id: SeriesId,
    pub child_series_id: SeriesId,
    pub target_distance: Minutes,
    pub early_wobble: Minutes,
    pub late_wobble: Minutes,
}

impl Link {
    pub fn new(
        id: LinkId,
        parent_series_id: SeriesId,
        child_series_id: SeriesId,
        target_distance: Minutes,
    ) -> Self {
        Link {
            id,
            parent_series_id,
            child_series_id,
            target_distance,
            early_wobble: Minutes::ZERO,
            late_wobble: Minutes::ZERO,
        }
    }

    pub fn with_wobble(mut self, early_wobble: Minutes, late_wobble: Minutes) -> Self {
        self.early_wobble = early_wobble;
        self.late_wobble = late_wobble;
        self
    }
}
