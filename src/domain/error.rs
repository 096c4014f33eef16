//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the task tree contract.
///
/// Construction and flattening never produce these; they come from the
/// validation entry points and from date updates that would invert a range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("task id must not be empty (parent: {})", parent.as_deref().unwrap_or("<root>"))]
    EmptyId { parent: Option<String> },

    #[error("duplicate task id: {0}")]
    DuplicateId(String),

    #[error("inverted date range for task {id}: start {start} is after end {end}")]
    InvertedRange { id: String, start: i64, end: i64 },

    #[error("cycle detected in task hierarchy at: {0}")]
    CycleDetected(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
