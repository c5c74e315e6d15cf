//! Condition entity (§3, §4.G)
//!
//! A boolean tree over completion history, attached at pattern leaves.
//! `Condition` is the parsed-and-reconstructed in-memory shape described by
//! §9 ("condition-tree reconstruction is a straightforward bottom-up join
//! on parentId"); that join itself is an adapter-marshaling concern and
//! lives in `infrastructure::fat_series`. Evaluation (the actual boolean
//! logic) is `application::services::condition_evaluator`.

use serde::{Deserialize, Serialize};

use super::target::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl CompareOp {
    pub fn apply(self, lhs: i64, rhs: i64) -> bool {
        match self {
            CompareOp::Lt => lhs < rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
            CompareOp::Ge => lhs >= rhs,
            CompareOp::Gt => lhs > rhs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Count { target: Target, op: CompareOp, value: i64, window_days: u32 },
    DaysSince { target: Target, op: CompareOp, value: i64 },
    And { children: Vec<Condition> },
    Or { children: Vec<Condition> },
    Not { child: Box<Condition> },
}
