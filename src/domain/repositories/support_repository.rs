//! Repository traits for the smaller adapter-owned rows (§6)
//!
//! Reminders/acks, cycling config, adaptive-duration config and tags. None
//! of these carry algorithmic weight of their own; they are grouped the way
//! `application/services/complexity_calculator.rs`'s sibling entity file
//! groups small related types.

use crate::domain::entities::{
    AdaptiveDurationConfig, CyclingConfig, Reminder, ReminderAck, ReminderId, SeriesId, Tag,
    TagId,
};
use crate::domain::errors::CoreError;
use crate::domain::value_objects::LocalDate;

pub trait ReminderRepository {
    fn create(&mut self, reminder: Reminder) -> Result<ReminderId, CoreError>;
    fn get(&self, id: ReminderId) -> Result<Reminder, CoreError>;
    fn update(&mut self, reminder: Reminder) -> Result<(), CoreError>;
    fn delete(&mut self, id: ReminderId) -> Result<(), CoreError>;
    fn list_by_series(&self, series_id: SeriesId) -> Vec<Reminder>;

    /// `DuplicateKeyError` if `(reminderId, instanceDate)` is already acked.
    fn ack(&mut self, ack: ReminderAck) -> Result<(), CoreError>;
    fn is_acked(&self, reminder_id: ReminderId, instance_date: LocalDate) -> bool;
    /// Removes acks strictly before `as_of`.
    fn purge_old_acks(&mut self, as_of: LocalDate) -> usize;
}

pub trait CyclingConfigRepository {
    fn get(&self, series_id: SeriesId) -> Option<CyclingConfig>;
    /// `None` removes both the config row and its items.
    fn set(&mut self, config: Option<CyclingConfig>, series_id: SeriesId) -> Result<(), CoreError>;
}

pub trait AdaptiveDurationConfigRepository {
    fn get(&self, series_id: SeriesId) -> Option<AdaptiveDurationConfig>;
    fn set(&mut self, config: Option<AdaptiveDurationConfig>, series_id: SeriesId) -> Result<(), CoreError>;
}

pub trait TagRepository {
    /// Idempotent: creating an existing tag name returns its existing id.
    fn create_idempotent(&mut self, name: &str) -> TagId;
    fn add_association(&mut self, series_id: SeriesId, tag_id: TagId) -> Result<(), CoreError>;
    fn remove_association(&mut self, series_id: SeriesId, tag_id: TagId) -> Result<(), CoreError>;
    fn tags_for_series(&self, series_id: SeriesId) -> Vec<Tag>;
    fn series_for_tag(&self, tag_id: TagId) -> Vec<SeriesId>;
}
