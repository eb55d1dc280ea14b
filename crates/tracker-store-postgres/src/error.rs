//! Error type for `tracker-store-postgres`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for tracker_core::Error {
  fn from(err: Error) -> Self {
    let Error::Database(inner) = &err;
    match inner {
      sqlx::Error::Database(db) if db.is_unique_violation() => {
        Self::UniqueViolation(db.message().to_owned())
      }
      sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
        Self::ConstraintViolation(db.message().to_owned())
      }
      sqlx::Error::Io(_)
      | sqlx::Error::Tls(_)
      | sqlx::Error::PoolTimedOut
      | sqlx::Error::PoolClosed => Self::StorageUnavailable(err.to_string()),
      _ => Self::Storage(Box::new(err)),
    }
  }
}
