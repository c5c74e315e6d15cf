//! Pattern repository trait (§6)

use std::collections::BTreeSet;

use crate::domain::entities::{GuardedPattern, PatternId, SeriesId};
use crate::domain::errors::CoreError;
use crate::domain::value_objects::Weekday;

#[cfg_attr(test, mockall::automock)]
pub trait PatternRepository {
    fn create(&mut self, series_id: SeriesId, pattern: GuardedPattern) -> Result<PatternId, CoreError>;
    fn get(&self, id: PatternId) -> Result<GuardedPattern, CoreError>;
    fn delete(&mut self, id: PatternId) -> Result<(), CoreError>;
    fn list_by_series(&self, series_id: SeriesId) -> Vec<(PatternId, GuardedPattern)>;
    /// `set(patternId, weekdays)` (§6): replaces the weekday set of an
    /// existing `weekly`/`weekdays` pattern in place, keeping its
    /// `PatternId` stable — the stored pattern's own variant shape is
    /// preserved, only the day set changes. `InvalidPatternError` on an
    /// empty set; `ValidationError` if the pattern isn't weekday-shaped.
    fn set_weekdays(&mut self, id: PatternId, weekdays: BTreeSet<Weekday>) -> Result<(), CoreError>;
}
