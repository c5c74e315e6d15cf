//! Small adapter-owned row types (§6)
//!
//! Reminders, cycling config, adaptive-duration config and tags have no
//! algorithmic weight of their own (cycling/adaptive-duration config feed
//! `application::services::adaptive_duration`; reminders and tags are pure
//! CRUD rows the core passes through) so they're grouped in one file, the
//! way the teacher groups `ControlResource`/`QuantitativeResource` together
//! in `resource.rs`.

use serde::{Deserialize, Serialize};

use super::ids::{PatternId, ReminderId, SeriesId, TagId};
use crate::domain::value_objects::{LocalDate, LocalDateTime, Minutes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub series_id: SeriesId,
    pub minutes_before: Minutes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderAck {
    pub reminder_id: ReminderId,
    pub instance_date: LocalDate,
    pub acked_at: LocalDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclingConfig {
    pub series_id: SeriesId,
    pub items: Vec<CyclingItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclingItem {
    pub position: u32,
    pub pattern_id: PatternId,
}

/// How `calculateAdaptiveDuration` samples recent completions (§4.H).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleMode {
    LastN(u32),
    WindowDays(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveDurationConfig {
    pub series_id: SeriesId,
    pub mode: SampleMode,
    pub fallback: Minutes,
    pub multiplier_milli: u32,
    pub minimum: Option<Minutes>,
    pub maximum: Option<Minutes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}
