//! [`SqliteStore`], the SQLite implementation of [`ProgressStore`].

use std::path::Path;

use rand_core::OsRng;
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use tracker_core::{
  access_code,
  curriculum::CURRICULUM,
  model::{
    CourseModule, CreatedStudent, ExamEntry, ExamRecord, NewExamRecord,
    NewStudent, ProgressEntry, ProgressWrite, Student, timestamp_now,
  },
  store::ProgressStore,
};

use crate::{
  Error, Result,
  encode::{
    MODULE_COLUMNS, RawExam, RawProgress, RawStudent, STUDENT_COLUMNS,
    encode_date, encode_dt, module_from_row,
  },
  schema::SCHEMA,
};

/// Joined progress columns matching [`RawProgress::from_row`].
const PROGRESS_SELECT: &str = "
  SELECT p.student_id, p.module_id, p.completed_units, p.percentage,
         p.last_updated, s.name, m.module_number, m.title, m.total_units
  FROM progress p
  JOIN students       s ON s.id = p.student_id
  JOIN course_modules m ON m.id = p.module_id";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A progress store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`. Call
  /// [`ProgressStore::initialize`] before first use.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::configure(conn).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::configure(conn).await
  }

  /// Shut down the background connection. Any clone still holding the store
  /// gets [`tracker_core::Error::StorageUnavailable`] from then on.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  /// Foreign keys are a per-connection setting in SQLite.
  async fn configure(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }
}

// ─── ProgressStore impl ──────────────────────────────────────────────────────

impl ProgressStore for SqliteStore {
  type Error = Error;

  fn database_kind(&self) -> &'static str { "SQLite (Local)" }

  async fn initialize(&self) -> Result<()> {
    let seeded = self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;

        let tx = conn.transaction()?;
        let count: i64 =
          tx.query_row("SELECT COUNT(*) FROM course_modules", [], |r| r.get(0))?;
        if count > 0 {
          return Ok(false);
        }

        {
          let mut insert = tx.prepare(
            "INSERT INTO course_modules
               (module_number, title, total_units, duration_minutes)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for module in CURRICULUM {
            insert.execute(rusqlite::params![
              module.module_number,
              module.title,
              module.total_units,
              module.duration_minutes,
            ])?;
          }
        }
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if seeded {
      info!(modules = CURRICULUM.len(), "seeded course modules");
    }
    Ok(())
  }

  // ── Students ──────────────────────────────────────────────────────────────

  async fn list_students(&self) -> Result<Vec<Student>> {
    let raws: Vec<RawStudent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STUDENT_COLUMNS} FROM students ORDER BY name, id"
        ))?;
        let rows = stmt
          .query_map([], RawStudent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn get_student(&self, id: i64) -> Result<Option<Student>> {
    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
            rusqlite::params![id],
            RawStudent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn add_student(&self, input: NewStudent) -> Result<CreatedStudent> {
    let code = match input.access_code.as_deref() {
      Some(code) => access_code::normalize(code),
      None => access_code::generate(&input.name, &mut OsRng),
    };
    let at_str = encode_dt(timestamp_now());
    let code_for_insert = code.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO students (name, email, access_code, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![input.name, input.email, code_for_insert, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    debug!(id, "inserted student");
    Ok(CreatedStudent { id, access_code: code })
  }

  async fn get_student_by_access_code(&self, code: &str) -> Result<Option<Student>> {
    let code = access_code::normalize(code);

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {STUDENT_COLUMNS} FROM students WHERE access_code = ?1"
            ),
            rusqlite::params![code],
            RawStudent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  // ── Modules ───────────────────────────────────────────────────────────────

  async fn list_modules(&self) -> Result<Vec<CourseModule>> {
    let modules = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MODULE_COLUMNS} FROM course_modules ORDER BY module_number, id"
        ))?;
        let rows = stmt
          .query_map([], module_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(modules)
  }

  async fn get_module(&self, id: i64) -> Result<Option<CourseModule>> {
    let module = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {MODULE_COLUMNS} FROM course_modules WHERE id = ?1"),
            rusqlite::params![id],
            module_from_row,
          )
          .optional()?)
      })
      .await?;

    Ok(module)
  }

  // ── Progress ──────────────────────────────────────────────────────────────

  async fn get_progress(&self, student_id: Option<i64>) -> Result<Vec<ProgressEntry>> {
    let raws: Vec<RawProgress> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(id) = student_id {
          let mut stmt = conn.prepare(&format!(
            "{PROGRESS_SELECT}
             WHERE p.student_id = ?1
             ORDER BY s.name, s.id, m.module_number, m.id"
          ))?;
          stmt
            .query_map(rusqlite::params![id], RawProgress::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "{PROGRESS_SELECT}
             ORDER BY s.name, s.id, m.module_number, m.id"
          ))?;
          stmt
            .query_map([], RawProgress::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProgress::into_entry).collect()
  }

  async fn upsert_progress(&self, write: ProgressWrite) -> Result<()> {
    let at_str = encode_dt(timestamp_now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO progress
             (student_id, module_id, completed_units, percentage, last_updated)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT (student_id, module_id) DO UPDATE SET
             completed_units = excluded.completed_units,
             percentage      = excluded.percentage,
             last_updated    = excluded.last_updated",
          rusqlite::params![
            write.student_id,
            write.module_id,
            write.completed_units,
            write.percentage,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  // ── Exams ─────────────────────────────────────────────────────────────────

  async fn get_exam_status(&self) -> Result<Vec<ExamEntry>> {
    let raws: Vec<RawExam> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT e.id, e.student_id, e.scheduled_date, e.passed,
                  e.attempt_number, e.notes, s.name
           FROM exam_status e
           JOIN students s ON s.id = e.student_id
           ORDER BY e.scheduled_date DESC NULLS LAST, e.id",
        )?;
        let rows = stmt
          .query_map([], RawExam::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExam::into_entry).collect()
  }

  async fn add_exam_record(&self, input: NewExamRecord) -> Result<ExamRecord> {
    let date_str = input.scheduled_date.map(encode_date);
    let notes = input.notes.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO exam_status
             (student_id, scheduled_date, passed, attempt_number, notes)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            input.student_id,
            date_str,
            input.passed,
            input.attempt_number,
            notes,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(ExamRecord {
      id,
      student_id: input.student_id,
      scheduled_date: input.scheduled_date,
      passed: input.passed,
      attempt_number: input.attempt_number,
      notes: input.notes,
    })
  }
}
