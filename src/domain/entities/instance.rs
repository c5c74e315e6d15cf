//! Instance entity (§3, internal to reflow)
//!
//! A concrete occurrence to be scheduled. Generated fresh by reflow phase 1
//! (§4.I) for each reflow invocation; nothing outside that invocation holds
//! a reference to one, so there is no id — identity within a reflow run is
//! the instance's position in the `Vec` it was generated into.

use serde::{Deserialize, Serialize};

use super::ids::SeriesId;
use crate::domain::value_objects::{LocalDateTime, LocalTime, Minutes};

/// The allowed shift window, in whole days, around an instance's ideal date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub days_before: u32,
    pub days_after: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: LocalTime,
    pub end: LocalTime,
}

/// Chain metadata attached to an instance whose series has an incoming link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRef {
    pub parent_series_id: SeriesId,
    pub chain_distance: Minutes,
    pub early_wobble: Minutes,
    pub late_wobble: Minutes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub series_id: SeriesId,
    pub fixed: bool,
    pub ideal_time: LocalDateTime,
    pub duration: Minutes,
    pub shift_window: ShiftWindow,
    pub time_window: Option<TimeWindow>,
    pub all_day: bool,
    pub parent: Option<ChainRef>,
}

impl Instance {
    pub fn ideal_date(&self) -> crate::domain::value_objects::LocalDate {
        self.ideal_time.date()
    }
}
