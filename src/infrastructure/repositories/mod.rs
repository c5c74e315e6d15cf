//! In-memory repository implementations (§6, §9)

pub mod in_memory_adapter;
pub mod rows;

pub use in_memory_adapter::InMemoryAdapter;
pub use rows::{CompletionRow, ExceptionRow, LinkRow, SeriesRow};
