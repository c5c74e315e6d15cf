//! Completion entity (§3)
//!
//! A historical execution record. Uniqueness on `(seriesId, instanceDate)`
//! is enforced by the adapter, not by this type.

use serde::{Deserialize, Serialize};

use super::ids::{CompletionId, SeriesId};
use crate::domain::value_objects::{LocalDate, LocalTime, Minutes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub id: CompletionId,
    pub series_id: SeriesId,
    pub instance_date: LocalDate,
    pub start_time: Option<LocalTime>,
    pub end_time: Option<LocalTime>,
    pub duration_minutes: Option<Minutes>,
}
