pub mod calendar;
pub mod minutes;
pub mod weekday;

pub use calendar::{LocalDate, LocalDateTime, LocalTime};
pub use minutes::Minutes;
pub use weekday::Weekday;
