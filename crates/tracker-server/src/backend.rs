//! The storage engine chosen at startup.
//!
//! [`ProgressStore`] uses native async methods and is therefore not object
//! safe, so the runtime choice between engines is a closed enum that forwards
//! each call to whichever store it holds.

use tracker_core::{
  Error, Result,
  model::{
    CourseModule, CreatedStudent, ExamEntry, ExamRecord, NewExamRecord,
    NewStudent, ProgressEntry, ProgressWrite, Student,
  },
  store::ProgressStore,
};
use tracker_store_postgres::PgStore;
use tracker_store_sqlite::SqliteStore;
use tracing::info;

use crate::settings::StorageEngine;

#[derive(Clone)]
pub enum Backend {
  Sqlite(SqliteStore),
  Postgres(PgStore),
}

impl Backend {
  /// Open (or connect to) the configured engine. The schema is not touched;
  /// call [`ProgressStore::initialize`] afterwards.
  pub async fn open(engine: &StorageEngine) -> Result<Self> {
    match engine {
      StorageEngine::Sqlite { path } => {
        info!(path = %path.display(), "using SQLite store");
        Ok(Self::Sqlite(SqliteStore::open(path).await?))
      }
      StorageEngine::Postgres { url } => {
        info!("using PostgreSQL store");
        Ok(Self::Postgres(PgStore::connect(url).await?))
      }
    }
  }

  /// Release the underlying connection or pool.
  pub async fn close(self) -> Result<()> {
    match self {
      Self::Sqlite(store) => Ok(store.close().await?),
      Self::Postgres(store) => {
        store.close().await;
        Ok(())
      }
    }
  }
}

/// Forward one call to the active store, converting its error.
macro_rules! forward {
  ($self:ident, $store:ident => $call:expr) => {
    match $self {
      Backend::Sqlite($store) => $call.await.map_err(Error::from),
      Backend::Postgres($store) => $call.await.map_err(Error::from),
    }
  };
}

impl ProgressStore for Backend {
  type Error = Error;

  fn database_kind(&self) -> &'static str {
    match self {
      Self::Sqlite(s) => s.database_kind(),
      Self::Postgres(s) => s.database_kind(),
    }
  }

  async fn initialize(&self) -> Result<()> {
    forward!(self, s => s.initialize())
  }

  async fn list_students(&self) -> Result<Vec<Student>> {
    forward!(self, s => s.list_students())
  }

  async fn get_student(&self, id: i64) -> Result<Option<Student>> {
    forward!(self, s => s.get_student(id))
  }

  async fn add_student(&self, input: NewStudent) -> Result<CreatedStudent> {
    forward!(self, s => s.add_student(input))
  }

  async fn get_student_by_access_code<'a>(
    &'a self,
    code: &'a str,
  ) -> Result<Option<Student>> {
    forward!(self, s => s.get_student_by_access_code(code))
  }

  async fn list_modules(&self) -> Result<Vec<CourseModule>> {
    forward!(self, s => s.list_modules())
  }

  async fn get_module(&self, id: i64) -> Result<Option<CourseModule>> {
    forward!(self, s => s.get_module(id))
  }

  async fn get_progress(
    &self,
    student_id: Option<i64>,
  ) -> Result<Vec<ProgressEntry>> {
    forward!(self, s => s.get_progress(student_id))
  }

  async fn upsert_progress(&self, write: ProgressWrite) -> Result<()> {
    forward!(self, s => s.upsert_progress(write))
  }

  async fn get_exam_status(&self) -> Result<Vec<ExamEntry>> {
    forward!(self, s => s.get_exam_status())
  }

  async fn add_exam_record(&self, input: NewExamRecord) -> Result<ExamRecord> {
    forward!(self, s => s.add_exam_record(input))
  }
}
