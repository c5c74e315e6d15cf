//! RelationalConstraint repository trait (§6)
//!
//! Independent of series lifecycle: dangling soft references (a constraint
//! naming a deleted series or a tag nobody holds) are permitted.

use crate::domain::entities::{RelationalConstraint, RelationalConstraintId};
use crate::domain::errors::CoreError;

pub trait RelationalConstraintRepository {
    fn create(&mut self, constraint: RelationalConstraint) -> Result<RelationalConstraintId, CoreError>;
    fn get(&self, id: RelationalConstraintId) -> Result<RelationalConstraint, CoreError>;
    fn update(&mut self, constraint: RelationalConstraint) -> Result<(), CoreError>;
    fn delete(&mut self, id: RelationalConstraintId) -> Result<(), CoreError>;
    fn all(&self) -> Vec<RelationalConstraint>;
}
