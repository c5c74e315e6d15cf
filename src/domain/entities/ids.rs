//! Opaque identifiers
//!
//! Every row-owning entity is identified by a small `Copy` newtype rather
//! than a bare `u64`, so the pure algorithms (reflow in particular, which
//! passes ids through domains, queues and partial assignments) can't
//! accidentally compare a `SeriesId` to a `PatternId`. Ids are minted by a
//! monotonic counter in the in-memory adapter; nothing about them is
//! meaningful beyond equality and hashing.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

opaque_id!(SeriesId);
opaque_id!(PatternId);
opaque_id!(ConditionId);
opaque_id!(ExceptionId);
opaque_id!(LinkId);
opaque_id!(RelationalConstraintId);
opaque_id!(CompletionId);
opaque_id!(ReminderId);
opaque_id!(TagId);
