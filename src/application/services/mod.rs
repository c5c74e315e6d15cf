pub mod adaptive_duration;
pub mod condition_evaluator;
pub mod link_service;
pub mod pattern_expansion;
pub mod relational_constraint_checker;
pub mod schedule_builder;

pub use adaptive_duration::calculate_adaptive_duration;
pub use condition_evaluator::{evaluate_condition, CompletionStore};
pub use pattern_expansion::{expand_pattern, DateRange, ExpandOptions};
pub use relational_constraint_checker::{check_constraint, DayInstance};
pub use schedule_builder::{cancel_instance, get_schedule, reschedule_instance, restore_instance, ScheduledOccurrence};
