//! Soft-reference target (§3)
//!
//! Conditions and relational constraints both reference either a single
//! series or a tag (which resolves to a set of tagged series at evaluation
//! time). Resolution itself is an adapter concern — this type only carries
//! the reference.

use serde::{Deserialize, Serialize};

use super::ids::SeriesId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Series(SeriesId),
    Tag(String),
}
