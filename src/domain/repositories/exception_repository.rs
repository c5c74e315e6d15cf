//! InstanceException repository trait (§6)
//!
//! `create` is an upsert on `(seriesId, originalDate)`: it replaces any
//! prior row for that pair rather than failing with `DuplicateKeyError`.
//! Range listing is `[start, end)` — start inclusive, end exclusive; this is
//! the one place in the whole adapter surface where a range is
//! half-open rather than inclusive on both ends.

use crate::domain::entities::{InstanceException, SeriesId};
use crate::domain::errors::CoreError;
use crate::domain::value_objects::LocalDate;

#[cfg_attr(test, mockall::automock)]
pub trait ExceptionRepository {
    fn upsert(&mut self, exception: InstanceException) -> Result<(), CoreError>;
    fn get(&self, series_id: SeriesId, original_date: LocalDate) -> Option<InstanceException>;
    fn list_by_series(&self, series_id: SeriesId) -> Vec<InstanceException>;
    /// `[start, end)`: start inclusive, end exclusive.
    fn list_in_range(&self, series_id: SeriesId, start: LocalDate, end: LocalDate) -> Vec<InstanceException>;
    fn delete(&mut self, series_id: SeriesId, original_date: LocalDate) -> Result<(), CoreError>;
}
