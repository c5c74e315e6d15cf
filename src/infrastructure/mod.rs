//! In-memory reference adapter (§6, §9)
//!
//! The core is adapter-agnostic: every persistence concern is a trait in
//! `domain::repositories`. This module is one concrete implementation of
//! that surface, grounded in the teacher's `InMemoryJobRepository`
//! (HashMap-backed, no external store), plus the fat-series
//! marshaling §9 asks implementers to provide.

pub mod fat_series;
pub mod repositories;

pub use fat_series::{load_series, save_series, FatSeries};
pub use repositories::InMemoryAdapter;
