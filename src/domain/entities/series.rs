//! Series entity (§3)
//!
//! A recurring definition. Patterns, conditions, completions, exceptions and
//! links all hang off a `Series` by its id; deletion rules (restricted vs.
//! cascading) live with the adapter trait (§6) since they require looking at
//! sibling tables, not at this struct alone.

use serde::{Deserialize, Serialize};

use super::ids::SeriesId;
use crate::domain::errors::CoreError;
use crate::domain::value_objects::{LocalDate, LocalDateTime, LocalTime, Minutes};

/// A series' time-of-day: a fixed clock time, or the "allDay" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Fixed(LocalTime),
    AllDay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
    pub start_date: Option<LocalDate>,
    pub end_date: Option<LocalDate>,
    pub created_at: LocalDateTime,
    pub time_of_day: Option<TimeOfDay>,
    pub duration: Option<Minutes>,
    pub locked: bool,
}

impl Series {
    pub fn new(id: SeriesId, title: impl Into<String>, created_at: LocalDateTime) -> Self {
        Series {
            id,
            title: title.into(),
            start_date: None,
            end_date: None,
            created_at,
            time_of_day: None,
            duration: None,
            locked: false,
        }
    }

    /// Validates the `startDate <= endDate` invariant when both are present.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(CoreError::ValidationError(format!(
                    "series {}: startDate {} is after endDate {}",
                    self.id, start, end
                )));
            }
        }
        Ok(())
    }

    /// The effective time-of-day for constructing instances: midnight for
    /// an all-day series, the fixed clock time otherwise. `None` (no
    /// time-of-day configured at all) also resolves to midnight, matching
    /// the "allDay -> 00:00:00" rule used throughout §4.
    pub fn effective_time(&self) -> LocalTime {
        match self.time_of_day {
            Some(TimeOfDay::Fixed(t)) => t,
            Some(TimeOfDay::AllDay) | None => crate::domain::value_objects::calendar::midnight(),
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self.time_of_day, Some(TimeOfDay::AllDay) | None)
    }
}
