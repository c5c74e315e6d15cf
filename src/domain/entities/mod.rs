pub mod completion;
pub mod condition;
pub mod ids;
pub mod instance;
pub mod instance_exception;
pub mod link;
pub mod pattern;
pub mod relational_constraint;
pub mod series;
pub mod support;
pub mod target;

pub use completion::Completion;
pub use condition::{CompareOp, Condition};
pub use ids::{
    CompletionId, ConditionId, ExceptionId, LinkId, PatternId, ReminderId,
    RelationalConstraintId, SeriesId, TagId,
};
pub use instance::{ChainRef, Instance, ShiftWindow, TimeWindow};
pub use instance_exception::{ExceptionType, InstanceException};
pub use link::{Link, MAX_CHAIN_LENGTH};
pub use pattern::{GuardedPattern, Pattern};
pub use relational_constraint::{RelationalConstraint, RelationalConstraintType};
pub use series::{Series, TimeOfDay};
pub use support::{
    AdaptiveDurationConfig, CyclingConfig, CyclingItem, Reminder, ReminderAck, SampleMode, Tag,
};
pub use target::Target;
