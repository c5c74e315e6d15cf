//! The error taxonomy (§7)
//!
//! Two kinds of failure coexist. `CoreError` is the tagged sum returned by
//! Result-valued operations (create/update/delete of domain objects,
//! exception operations, link operations) — callers pattern-match on the
//! variant name, which is why each one is named after the stable identifier
//! in §7 rather than grouped generically. `ParseError` is raised by parsing
//! and always carries the offending input string.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("validation failed: {0}")]
    ValidationError(String),

    #[error("not found: {0}")]
    NotFoundError(String),

    #[error("duplicate key: {0}")]
    DuplicateKeyError(String),

    #[error("foreign key violation: {0}")]
    ForeignKeyError(String),

    #[error("invalid data: {0}")]
    InvalidDataError(String),

    #[error("cycle detected: {0}")]
    CycleDetectedError(String),

    #[error("chain depth exceeded: {0}")]
    ChainDepthExceededError(String),

    #[error("self-link rejected: {0}")]
    SelfLinkError(String),

    #[error("already linked: {0}")]
    AlreadyLinkedError(String),

    #[error("already cancelled: {0}")]
    AlreadyCancelledError(String),

    #[error("cancelled instance: {0}")]
    CancelledInstanceError(String),

    #[error("instance does not exist: {0}")]
    NonExistentInstanceError(String),

    #[error("no exception to restore: {0}")]
    NoExceptionError(String),

    #[error("invalid pattern: {0}")]
    InvalidPatternError(String),

    #[error("invalid range: {0}")]
    InvalidRangeError(String),
}

impl CoreError {
    /// The stable type identifier §7 says callers pattern-match on.
    pub fn type_name(&self) -> &'static str {
        match self {
            CoreError::ValidationError(_) => "ValidationError",
            CoreError::NotFoundError(_) => "NotFoundError",
            CoreError::DuplicateKeyError(_) => "DuplicateKeyError",
            CoreError::ForeignKeyError(_) => "ForeignKeyError",
            CoreError::InvalidDataError(_) => "InvalidDataError",
            CoreError::CycleDetectedError(_) => "CycleDetectedError",
            CoreError::ChainDepthExceededError(_) => "ChainDepthExceededError",
            CoreError::SelfLinkError(_) => "SelfLinkError",
            CoreError::AlreadyLinkedError(_) => "AlreadyLinkedError",
            CoreError::AlreadyCancelledError(_) => "AlreadyCancelledError",
            CoreError::CancelledInstanceError(_) => "CancelledInstanceError",
            CoreError::NonExistentInstanceError(_) => "NonExistentInstanceError",
            CoreError::NoExceptionError(_) => "NoExceptionError",
            CoreError::InvalidPatternError(_) => "InvalidPatternError",
            CoreError::InvalidRangeError(_) => "InvalidRangeError",
        }
    }
}

/// A raised parsing failure; always names the offending input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to parse {kind} from {input:?}")]
pub struct ParseError {
    pub kind: &'static str,
    pub input: String,
}

impl ParseError {
    pub fn new(kind: &'static str, input: impl Into<String>) -> Self {
        ParseError { kind, input: input.into() }
    }
}

impl From<ParseError> for CoreError {
    fn from(e: ParseError) -> Self {
        CoreError::ValidationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_are_stable() {
        assert_eq!(CoreError::NotFoundError("x".into()).type_name(), "NotFoundError");
        assert_eq!(CoreError::InvalidRangeError("x".into()).type_name(), "InvalidRangeError");
    }

    #[test]
    fn parse_error_names_the_input() {
        let e = ParseError::new("LocalDate", "not-a-date");
        assert!(e.to_string().contains("not-a-date"));
    }
}
