//! InstanceException entity (§3)
//!
//! Overrides a single occurrence of a series: cancel it, or reschedule it to
//! a new date-time. Lifecycle operations (`cancelInstance`,
//! `rescheduleInstance`, `restoreInstance`) need pattern expansion to check
//! "is this actually a valid occurrence", so they live in
//! `application::services::schedule_builder`; this type only carries the
//! data and its two structural invariants.

use serde::{Deserialize, Serialize};

use super::ids::{ExceptionId, SeriesId};
use crate::domain::errors::CoreError;
use crate::domain::value_objects::{LocalDate, LocalDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExceptionType {
    Cancelled,
    Rescheduled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceException {
    pub id: ExceptionId,
    pub series_id: SeriesId,
    pub original_date: LocalDate,
    pub exception_type: ExceptionType,
    pub new_time: Option<LocalDateTime>,
}

impl InstanceException {
    pub fn cancelled(id: ExceptionId, series_id: SeriesId, original_date: LocalDate) -> Self {
        InstanceException {
            id,
            series_id,
            original_date,
            exception_type: ExceptionType::Cancelled,
            new_time: None,
        }
    }

    pub fn rescheduled(
        id: ExceptionId,
        series_id: SeriesId,
        original_date: LocalDate,
        new_time: LocalDateTime,
    ) -> Self {
        InstanceException {
            id,
            series_id,
            original_date,
            exception_type: ExceptionType::Rescheduled,
            new_time: Some(new_time),
        }
    }

    /// `rescheduled` requires `newTime`; `cancelled` has no `newTime`.
    pub fn validate(&self) -> Result<(), CoreError> {
        match (self.exception_type, self.new_time) {
            (ExceptionType::Rescheduled, None) => Err(CoreError::ValidationError(format!(
                "exception {}: rescheduled exceptions require newTime",
                self.id
            ))),
            (ExceptionType::Cancelled, Some(_)) => Err(CoreError::ValidationError(format!(
                "exception {}: cancelled exceptions must not carry newTime",
                self.id
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::calendar::{make_date, make_date_time, midnight};

    #[test]
    fn cancelled_without_new_time_is_valid() {
        let e = InstanceException::cancelled(ExceptionId(1), SeriesId(1), make_date(2024, 1, 1).unwrap());
        assert!(e.validate().is_ok());
    }

    #[test]
    fn rescheduled_requires_new_time() {
        let mut e = InstanceException::rescheduled(
            ExceptionId(1),
            SeriesId(1),
            make_date(2024, 1, 1).unwrap(),
            make_date_time(make_date(2024, 1, 2).unwrap(), midnight()),
        );
        assert!(e.validate().is_ok());
        e.new_time = None;
        assert!(e.validate().is_err());
    }
}
