pub mod completion_repository;
pub mod condition_repository;
pub mod exception_repository;
pub mod link_repository;
pub mod pattern_repository;
pub mod relational_constraint_repository;
pub mod series_repository;
pub mod support_repository;
pub mod transaction;

pub use completion_repository::CompletionRepository;
pub use condition_repository::{ConditionRepository, ConditionRow, ConditionRowKind};
pub use exception_repository::ExceptionRepository;
pub use link_repository::LinkRepository;
pub use pattern_repository::PatternRepository;
pub use relational_constraint_repository::RelationalConstraintRepository;
pub use series_repository::SeriesRepository;
pub use support_repository::{
    AdaptiveDurationConfigRepository, CyclingConfigRepository, ReminderRepository, TagRepository,
};
pub use transaction::TransactionManager;

#[cfg(test)]
pub use exception_repository::MockExceptionRepository;
#[cfg(test)]
pub use pattern_repository::MockPatternRepository;
#[cfg(test)]
pub use series_repository::MockSeriesRepository;

/// The full adapter surface the core consumes, bundled for convenience.
/// Most services only need a subset; this trait exists so
/// `infrastructure::InMemoryAdapter` (and any real backing store) can be
/// passed as a single object.
pub trait Adapter:
    SeriesRepository
    + PatternRepository
    + ConditionRepository
    + CompletionRepository
    + ExceptionRepository
    + LinkRepository
    + RelationalConstraintRepository
    + ReminderRepository
    + CyclingConfigRepository
    + AdaptiveDurationConfigRepository
    + TagRepository
    + TransactionManager
{
}

impl<T> Adapter for T where
    T: SeriesRepository
        + PatternRepository
        + ConditionRepository
        + CompletionRepository
        + ExceptionRepository
        + LinkRepository
        + RelationalConstraintRepository
        + ReminderRepository
        + CyclingConfigRepository
        + AdaptiveDurationConfigRepository
        + TagRepository
        + TransactionManager
{
}
