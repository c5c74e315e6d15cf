//! Completion repository trait (§6)

use crate::domain::entities::{Completion, CompletionId, SeriesId};
use crate::domain::errors::CoreError;
use crate::domain::value_objects::LocalDate;

pub trait CompletionRepository {
    /// `DuplicateKeyError` if `(seriesId, instanceDate)` already has a row.
    fn create(&mut self, completion: Completion) -> Result<CompletionId, CoreError>;
    fn delete(&mut self, id: CompletionId) -> Result<(), CoreError>;
    fn list_by_series(&self, series_id: SeriesId) -> Vec<Completion>;
    fn get_by_instance(&self, series_id: SeriesId, instance_date: LocalDate) -> Option<Completion>;
}
