//! Pattern entity (§3, §4.B)
//!
//! One recurrence primitive bound to a series, optionally guarded by a
//! condition tree. Construction validates the documented domain
//! restrictions (`InvalidPatternError`); the expansion algorithm itself
//! lives in `application::services::pattern_expansion` since it is
//! behavior, not data.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use crate::domain::errors::CoreError;
use crate::domain::value_objects::Weekday;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    Daily,
    EveryNDays { n: u32 },
    Weekly { days_of_week: Option<BTreeSet<Weekday>> },
    EveryNWeeks { n: u32, weekday: Option<Weekday> },
    Monthly { day: u32 },
    LastDayOfMonth,
    Yearly { month: u32, day: u32 },
    Weekdays { days: BTreeSet<Weekday> },
    NthWeekdayOfMonth { n: i64, weekday: Weekday },
    LastWeekdayOfMonth { weekday: Weekday },
    NthToLastWeekdayOfMonth { n: i64, weekday: Weekday },
    Union { patterns: Vec<Pattern> },
    Except { base: Box<Pattern>, exceptions: Vec<Pattern> },
}

/// A pattern together with the (optional) condition tree that guards it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardedPattern {
    pub pattern: Pattern,
    pub condition: Option<Condition>,
}

impl Pattern {
    pub fn daily() -> Pattern {
        Pattern::Daily
    }

    pub fn every_n_days(n: u32) -> Result<Pattern, CoreError> {
        if n < 1 {
            return Err(CoreError::InvalidPatternError(format!(
                "everyNDays requires n >= 1, got {n}"
            )));
        }
        Ok(Pattern::EveryNDays { n })
    }

    pub fn weekly(days_of_week: Option<BTreeSet<Weekday>>) -> Pattern {
        Pattern::Weekly { days_of_week }
    }

    pub fn every_n_weeks(n: u32, weekday: Option<Weekday>) -> Result<Pattern, CoreError> {
        if n < 1 {
            return Err(CoreError::InvalidPatternError(format!(
                "everyNWeeks requires n >= 1, got {n}"
            )));
        }
        Ok(Pattern::EveryNWeeks { n, weekday })
    }

    pub fn monthly(day: u32) -> Result<Pattern, CoreError> {
        if !(1..=31).contains(&day) {
            return Err(CoreError::InvalidPatternError(format!(
                "monthly day must be in 1..=31, got {day}"
            )));
        }
        Ok(Pattern::Monthly { day })
    }

    pub fn last_day_of_month() -> Pattern {
        Pattern::LastDayOfMonth
    }

    pub fn yearly(month: u32, day: u32) -> Result<Pattern, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidPatternError(format!(
                "yearly month must be in 1..=12, got {month}"
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(CoreError::InvalidPatternError(format!(
                "yearly day must be in 1..=31, got {day}"
            )));
        }
        Ok(Pattern::Yearly { month, day })
    }

    pub fn weekdays(days: BTreeSet<Weekday>) -> Result<Pattern, CoreError> {
        if days.is_empty() {
            return Err(CoreError::InvalidPatternError(
                "weekdays requires a nonempty set".to_string(),
            ));
        }
        Ok(Pattern::Weekdays { days })
    }

    pub fn nth_weekday_of_month(n: i64, weekday: Weekday) -> Pattern {
        Pattern::NthWeekdayOfMonth { n, weekday }
    }

    pub fn last_weekday_of_month(weekday: Weekday) -> Pattern {
        Pattern::LastWeekdayOfMonth { weekday }
    }

    pub fn nth_to_last_weekday_of_month(n: i64, weekday: Weekday) -> Pattern {
        Pattern::NthToLastWeekdayOfMonth { n, weekday }
    }

    pub fn union(patterns: Vec<Pattern>) -> Pattern {
        Pattern::Union { patterns }
    }

    pub fn except(base: Pattern, exceptions: Vec<Pattern>) -> Pattern {
        Pattern::Except { base: Box::new(base), exceptions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_n_days_rejects_zero() {
        assert!(Pattern::every_n_days(0).is_err());
        assert!(Pattern::every_n_days(1).is_ok());
    }

    #[test]
    fn monthly_rejects_out_of_domain_day() {
        assert!(Pattern::monthly(0).is_err());
        assert!(Pattern::monthly(32).is_err());
        assert!(Pattern::monthly(31).is_ok());
    }

    #[test]
    fn yearly_rejects_out_of_domain_month_or_day() {
        assert!(Pattern::yearly(13, 1).is_err());
        assert!(Pattern::yearly(1, 32).is_err());
        assert!(Pattern::yearly(2, 29).is_ok());
    }

    #[test]
    fn weekdays_rejects_empty_set() {
        assert!(Pattern::weekdays(BTreeSet::new()).is_err());
    }
}
