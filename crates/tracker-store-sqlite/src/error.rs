//! Error type for `tracker-store-sqlite`.

use rusqlite::{ErrorCode, ffi};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for tracker_core::Error {
  fn from(err: Error) -> Self {
    let failure = match &err {
      Error::Database(tokio_rusqlite::Error::Rusqlite(
        rusqlite::Error::SqliteFailure(failure, _),
      )) => Some(*failure),
      Error::Database(tokio_rusqlite::Error::ConnectionClosed) => {
        return Self::StorageUnavailable(err.to_string());
      }
      _ => None,
    };

    match failure {
      Some(f) if f.code == ErrorCode::ConstraintViolation => {
        match f.extended_code {
          ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            Self::UniqueViolation(err.to_string())
          }
          ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
            Self::ConstraintViolation(err.to_string())
          }
          _ => Self::Storage(Box::new(err)),
        }
      }
      Some(f)
        if matches!(
          f.code,
          ErrorCode::CannotOpen
            | ErrorCode::DatabaseBusy
            | ErrorCode::DatabaseLocked
        ) =>
      {
        Self::StorageUnavailable(err.to_string())
      }
      _ => Self::Storage(Box::new(err)),
    }
  }
}
