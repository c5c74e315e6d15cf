pub mod reflow;

pub use reflow::{reflow, Assignment, Conflict, ReflowInput, ReflowOutput, ReflowSeriesInput, Severity};
