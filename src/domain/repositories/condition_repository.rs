//! Condition repository trait (§6)
//!
//! Conditions persist as flat rows with a `parentId` pointer; `Condition`
//! trees are reconstructed bottom-up by `infrastructure::fat_series`. A
//! `parentId` update that would create a cycle fails with
//! `InvalidDataError`; deleting a row cascades its children.

use crate::domain::entities::{ConditionId, SeriesId};
use crate::domain::errors::CoreError;

/// A single flat condition row, as persisted, before tree reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionRow {
    pub id: ConditionId,
    pub series_id: SeriesId,
    pub parent_id: Option<ConditionId>,
    pub kind: ConditionRowKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionRowKind {
    Count { target: crate::domain::entities::Target, op: crate::domain::entities::CompareOp, value: i64, window_days: u32 },
    DaysSince { target: crate::domain::entities::Target, op: crate::domain::entities::CompareOp, value: i64 },
    And,
    Or,
    Not,
}

pub trait ConditionRepository {
    fn create(&mut self, row: ConditionRow) -> Result<ConditionId, CoreError>;
    fn get(&self, id: ConditionId) -> Result<ConditionRow, CoreError>;
    fn update(&mut self, row: ConditionRow) -> Result<(), CoreError>;
    fn delete(&mut self, id: ConditionId) -> Result<(), CoreError>;
    fn list_by_series(&self, series_id: SeriesId) -> Vec<ConditionRow>;
}
