//! Series repository trait (§6)
//!
//! The persistence adapter is an external collaborator; only the interface
//! the core consumes is specified here. Deletion is restricted when any
//! completion references the series or when the series is a link parent,
//! and otherwise cascades patterns, conditions, exceptions, tags, reminders,
//! cycling config and adaptive-duration config (§3).

use crate::domain::entities::{Series, SeriesId};
use crate::domain::errors::CoreError;

#[cfg_attr(test, mockall::automock)]
pub trait SeriesRepository {
    fn create(&mut self, series: Series) -> Result<SeriesId, CoreError>;
    fn get(&self, id: SeriesId) -> Result<Series, CoreError>;
    fn update(&mut self, series: Series) -> Result<(), CoreError>;
    /// `NotFoundError` if the series does not exist. `ValidationError` (the
    /// "restricted" case) if the series has completions or is a link
    /// parent; otherwise cascades per §3.
    fn delete(&mut self, id: SeriesId) -> Result<(), CoreError>;
    fn get_all(&self) -> Vec<Series>;
    fn get_by_tag(&self, tag: &str) -> Vec<Series>;
}
