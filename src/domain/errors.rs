use thiserror::Error;

/// Aggregate-level invariants broken at the pre-persistence checkpoint.
///
/// Carries every violation found in one pass so an operator sees the full
/// picture instead of fixing rules one save attempt at a time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", .violations.join("; "))]
pub struct ValidationFailure {
    pub violations: Vec<String>,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found")]
    NotFound,
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Illegal state: {0}")]
    IllegalState(String),
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("Internal error: {0}")]
    Internal(String),
}
