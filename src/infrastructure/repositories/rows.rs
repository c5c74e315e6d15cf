//! Row dual-casing (§6, SPEC_FULL §C.7)
//!
//! The wire shape of a stored row accepts either camelCase or snake_case
//! field names on the way in and always emits camelCase on the way out,
//! so a row round-trips regardless of which casing convention the caller
//! used to write it. Only the rows an external caller is likely to
//! exchange with the adapter (series, completions, exceptions, links) get
//! a dedicated row type; the rest (patterns, conditions, reminders, ...)
//! are adapter-internal and travel as domain types directly.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Completion, CompletionId, ExceptionId, ExceptionType, InstanceException, Link, LinkId, Series,
    SeriesId, TimeOfDay,
};
use crate::domain::value_objects::{LocalDate, LocalDateTime, Minutes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRow {
    #[serde(alias = "id")]
    pub id: SeriesId,
    #[serde(alias = "title")]
    pub title: String,
    #[serde(alias = "start_date")]
    pub start_date: Option<LocalDate>,
    #[serde(alias = "end_date")]
    pub end_date: Option<LocalDate>,
    #[serde(alias = "created_at")]
    pub created_at: LocalDateTime,
    #[serde(alias = "time_of_day")]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(alias = "duration")]
    pub duration: Option<Minutes>,
    #[serde(alias = "locked")]
    pub locked: bool,
}

impl From<&Series> for SeriesRow {
    fn from(s: &Series) -> Self {
        SeriesRow {
            id: s.id,
            title: s.title.clone(),
            start_date: s.start_date,
            end_date: s.end_date,
            created_at: s.created_at,
            time_of_day: s.time_of_day,
            duration: s.duration,
            locked: s.locked,
        }
    }
}

impl From<SeriesRow> for Series {
    fn from(r: SeriesRow) -> Self {
        Series {
            id: r.id,
            title: r.title,
            start_date: r.start_date,
            end_date: r.end_date,
            created_at: r.created_at,
            time_of_day: r.time_of_day,
            duration: r.duration,
            locked: r.locked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRow {
    #[serde(alias = "id")]
    pub id: CompletionId,
    #[serde(alias = "series_id")]
    pub series_id: SeriesId,
    #[serde(alias = "instance_date")]
    pub instance_date: LocalDate,
    #[serde(alias = "start_time")]
    pub start_time: Option<crate::domain::value_objects::LocalTime>,
    #[serde(alias = "end_time")]
    pub end_time: Option<crate::domain::value_objects::LocalTime>,
    #[serde(alias = "duration_minutes")]
    pub duration_minutes: Option<Minutes>,
}

impl From<&Completion> for CompletionRow {
    fn from(c: &Completion) -> Self {
        CompletionRow {
            id: c.id,
            series_id: c.series_id,
            instance_date: c.instance_date,
            start_time: c.start_time,
            end_time: c.end_time,
            duration_minutes: c.duration_minutes,
        }
    }
}

impl From<CompletionRow> for Completion {
    fn from(r: CompletionRow) -> Self {
        Completion {
            id: r.id,
            series_id: r.series_id,
            instance_date: r.instance_date,
            start_time: r.start_time,
            end_time: r.end_time,
            duration_minutes: r.duration_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionRow {
    #[serde(alias = "id")]
    pub id: ExceptionId,
    #[serde(alias = "series_id")]
    pub series_id: SeriesId,
    #[serde(alias = "original_date")]
    pub original_date: LocalDate,
    #[serde(alias = "exception_type")]
    pub exception_type: ExceptionType,
    #[serde(alias = "new_time")]
    pub new_time: Option<LocalDateTime>,
}

impl From<&InstanceException> for ExceptionRow {
    fn from(e: &InstanceException) -> Self {
        ExceptionRow {
            id: e.id,
            series_id: e.series_id,
            original_date: e.original_date,
            exception_type: e.exception_type,
            new_time: e.new_time,
        }
    }
}

impl From<ExceptionRow> for InstanceException {
    fn from(r: ExceptionRow) -> Self {
        InstanceException {
            id: r.id,
            series_id: r.series_id,
            original_date: r.original_date,
            exception_type: r.exception_type,
            new_time: r.new_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRow {
    #[serde(alias = "id")]
    pub id: LinkId,
    #[serde(alias = "parent_series_id")]
    pub parent_series_id: SeriesId,
    #[serde(alias = "child_series_id")]
    pub child_series_id: SeriesId,
    #[serde(alias = "target_distance")]
    pub target_distance: Minutes,
    #[serde(alias = "early_wobble")]
    pub early_wobble: Minutes,
    #[serde(alias = "late_wobble")]
    pub late_wobble: Minutes,
}

impl From<&Link> for LinkRow {
    fn from(l: &Link) -> Self {
        LinkRow {
            id: l.id,
            parent_series_id: l.parent_series_id,
            child_series_id: l.child_series_id,
            target_distance: l.target_distance,
            early_wobble: l.early_wobble,
            late_wobble: l.late_wobble,
        }
    }
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            parent_series_id: r.parent_series_id,
            child_series_id: r.child_series_id,
            target_distance: r.target_distance,
            early_wobble: r.early_wobble,
            late_wobble: r.late_wobble,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::calendar::{make_date, make_date_time, midnight};

    #[test]
    fn series_row_round_trips_through_camel_case() {
        let s = Series::new(SeriesId(1), "nightly backup", make_date_time(make_date(2024, 1, 1).unwrap(), midnight()));
        let row = SeriesRow::from(&s);
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"startDate\""));
        let back: SeriesRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn series_row_accepts_snake_case_input() {
        let json = r#"{"id":1,"title":"x","start_date":null,"end_date":null,"created_at":"2024-01-01T00:00:00","time_of_day":null,"duration":null,"locked":false}"#;
        let row: SeriesRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.id, SeriesId(1));
        assert!(!row.locked);
    }

    #[test]
    fn completion_row_round_trips() {
        let c = Completion {
            id: CompletionId(1),
            series_id: SeriesId(1),
            instance_date: make_date(2024, 1, 1).unwrap(),
            start_time: None,
            end_time: None,
            duration_minutes: Some(Minutes::new(30)),
        };
        let row = CompletionRow::from(&c);
        let json = serde_json::to_string(&row).unwrap();
        let back: CompletionRow = serde_json::from_str(&json).unwrap();
        assert_eq!(Completion::from(back), c);
    }
}
