//! Non-negative minute-granularity duration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A non-negative integer count of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Minutes(u32);

impl Minutes {
    pub const ZERO: Minutes = Minutes(0);

    pub fn new(value: u32) -> Self {
        Minutes(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Add for Minutes {
    type Output = Minutes;

    fn add(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 + rhs.0)
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

impl From<u32> for Minutes {
    fn from(value: u32) -> Self {
        Minutes(value)
    }
}
