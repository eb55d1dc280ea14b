//! Error types for `tracker-core`.
//!
//! Storage engines convert their own error enums into [`Error`] so that every
//! caller sees the same classification regardless of the active engine.

use thiserror::Error;

/// A caller-correctable input problem. Each rule has its own variant so that
/// clients can tell which check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("name is required")]
  MissingName,

  #[error("name must be between 2 and 100 characters (got {0})")]
  NameLength(usize),

  #[error("invalid email format: {0:?}")]
  InvalidEmail(String),

  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("percentage must be between 0 and 100 (got {0})")]
  PercentageOutOfRange(i64),

  #[error("completed units must be between 0 and {total} (got {completed})")]
  CompletedOutOfRange { completed: i64, total: i64 },

  #[error("total units must be greater than zero (got {0})")]
  NonPositiveTotal(i64),

  #[error("total units {declared} does not match module total {expected}")]
  TotalMismatch { declared: i64, expected: i64 },

  #[error("attempt number must be at least 1 (got {0})")]
  InvalidAttempt(i64),
}

impl ValidationError {
  /// The request field this rule applies to.
  pub fn field(&self) -> &'static str {
    match self {
      Self::MissingName | Self::NameLength(_) => "name",
      Self::InvalidEmail(_) => "email",
      Self::MissingField(field) => field,
      Self::PercentageOutOfRange(_) => "percentage",
      Self::CompletedOutOfRange { .. } => "completedUnits",
      Self::NonPositiveTotal(_) | Self::TotalMismatch { .. } => "totalUnits",
      Self::InvalidAttempt(_) => "attemptNumber",
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  /// Authenticated, but the identity may not perform this action.
  #[error("forbidden: {0}")]
  Forbidden(String),

  /// No session (or an unrecognised one) where a session is required.
  #[error("authentication required")]
  Unauthenticated,

  #[error("not found: {0}")]
  NotFound(String),

  /// Duplicate email, access code, or composite key on insert.
  #[error("unique constraint violated: {0}")]
  UniqueViolation(String),

  /// A referenced student or module row does not exist.
  #[error("constraint violated: {0}")]
  ConstraintViolation(String),

  #[error("storage unavailable: {0}")]
  StorageUnavailable(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Stable machine-readable name for the error kind.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Validation(_) => "validation",
      Self::Forbidden(_) => "forbidden",
      Self::Unauthenticated => "unauthenticated",
      Self::NotFound(_) => "not_found",
      Self::UniqueViolation(_) => "unique_violation",
      Self::ConstraintViolation(_) => "constraint_violation",
      Self::StorageUnavailable(_) => "storage_unavailable",
      Self::Storage(_) => "storage",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
