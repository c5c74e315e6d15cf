//! RelationalConstraint entity (§3, §4.F)

use serde::{Deserialize, Serialize};

use super::ids::RelationalConstraintId;
use super::target::Target;
use crate::domain::value_objects::Minutes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationalConstraintType {
    MustBeOnSameDay,
    CantBeOnSameDay,
    MustBeBefore,
    MustBeAfter,
    MustBeNextTo,
    CantBeNextTo,
    MustBeWithin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationalConstraint {
    pub id: RelationalConstraintId,
    pub constraint_type: RelationalConstraintType,
    pub source_target: Target,
    pub dest_target: Target,
    /// Only meaningful for `MustBeWithin`.
    pub within: Option<Minutes>,
}
