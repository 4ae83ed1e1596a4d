//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violated preconditions on course records and the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("course identifier must not be empty")]
    EmptyIdentifier,

    #[error("course title must not be empty (course {0})")]
    EmptyTitle(String),

    #[error("duplicate course identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
