//! [`PgStore`], the PostgreSQL implementation of [`ProgressStore`].

use std::time::Duration;

use rand_core::OsRng;
use sqlx::{PgPool, postgres::PgPoolOptions};
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
  rows::{ExamRow, ModuleRow, ProgressRow, StudentRow},
  schema::SCHEMA,
};

const STUDENT_SELECT: &str =
  "SELECT id, name, email, access_code, created_at FROM students";

const MODULE_SELECT: &str =
  "SELECT id, module_number, title, total_units, duration_minutes FROM course_modules";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A progress store backed by a PostgreSQL connection pool.
///
/// Cloning is cheap; the pool is reference-counted.
#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  /// Connect to `database_url`. Call [`ProgressStore::initialize`] before
  /// first use.
  pub async fn connect(database_url: &str) -> Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(5)
      .acquire_timeout(Duration::from_secs(5))
      .connect(database_url)
      .await?;
    Ok(Self { pool })
  }

  /// Wrap an existing pool.
  pub fn from_pool(pool: PgPool) -> Self { Self { pool } }

  /// Close every pooled connection, waiting for checked-out ones to return.
  pub async fn close(&self) { self.pool.close().await }
}

// ─── ProgressStore impl ──────────────────────────────────────────────────────

impl ProgressStore for PgStore {
  type Error = Error;

  fn database_kind(&self) -> &'static str { "PostgreSQL" }

  async fn initialize(&self) -> Result<()> {
    sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;

    // The lock keeps two processes starting at once from both seeding.
    let mut tx = self.pool.begin().await?;
    sqlx::query("LOCK TABLE course_modules IN EXCLUSIVE MODE")
      .execute(&mut *tx)
      .await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM course_modules")
      .fetch_one(&mut *tx)
      .await?;
    if count > 0 {
      tx.rollback().await?;
      return Ok(());
    }

    for module in CURRICULUM {
      sqlx::query(
        "INSERT INTO course_modules
           (module_number, title, total_units, duration_minutes)
         VALUES ($1, $2, $3, $4)",
      )
      .bind(module.module_number)
      .bind(module.title)
      .bind(module.total_units)
      .bind(module.duration_minutes)
      .execute(&mut *tx)
      .await?;
    }
    tx.commit().await?;

    info!(modules = CURRICULUM.len(), "seeded course modules");
    Ok(())
  }

  // ── Students ──────────────────────────────────────────────────────────────

  async fn list_students(&self) -> Result<Vec<Student>> {
    let rows: Vec<StudentRow> = sqlx::query_as(&format!(
      "{STUDENT_SELECT} ORDER BY name COLLATE \"C\", id"
    ))
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Student::from).collect())
  }

  async fn get_student(&self, id: i64) -> Result<Option<Student>> {
    let row: Option<StudentRow> =
      sqlx::query_as(&format!("{STUDENT_SELECT} WHERE id = $1"))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

    Ok(row.map(Student::from))
  }

  async fn add_student(&self, input: NewStudent) -> Result<CreatedStudent> {
    let code = match input.access_code.as_deref() {
      Some(code) => access_code::normalize(code),
      None => access_code::generate(&input.name, &mut OsRng),
    };

    let id: i64 = sqlx::query_scalar(
      "INSERT INTO students (name, email, access_code, created_at)
       VALUES ($1, $2, $3, $4)
       RETURNING id",
    )
    .bind(&input.name)
    .bind(&input.email)
    .bind(&code)
    .bind(timestamp_now())
    .fetch_one(&self.pool)
    .await?;

    debug!(id, "inserted student");
    Ok(CreatedStudent { id, access_code: code })
  }

  async fn get_student_by_access_code(&self, code: &str) -> Result<Option<Student>> {
    let row: Option<StudentRow> =
      sqlx::query_as(&format!("{STUDENT_SELECT} WHERE access_code = $1"))
        .bind(access_code::normalize(code))
        .fetch_optional(&self.pool)
        .await?;

    Ok(row.map(Student::from))
  }

  // ── Modules ───────────────────────────────────────────────────────────────

  async fn list_modules(&self) -> Result<Vec<CourseModule>> {
    let rows: Vec<ModuleRow> =
      sqlx::query_as(&format!("{MODULE_SELECT} ORDER BY module_number, id"))
        .fetch_all(&self.pool)
        .await?;

    Ok(rows.into_iter().map(CourseModule::from).collect())
  }

  async fn get_module(&self, id: i64) -> Result<Option<CourseModule>> {
    let row: Option<ModuleRow> =
      sqlx::query_as(&format!("{MODULE_SELECT} WHERE id = $1"))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

    Ok(row.map(CourseModule::from))
  }

  // ── Progress ──────────────────────────────────────────────────────────────

  async fn get_progress(&self, student_id: Option<i64>) -> Result<Vec<ProgressEntry>> {
    let rows: Vec<ProgressRow> = sqlx::query_as(
      "SELECT p.student_id, p.module_id, p.completed_units, p.percentage,
              p.last_updated,
              s.name          AS student_name,
              m.module_number,
              m.title         AS module_title,
              m.total_units
       FROM progress p
       JOIN students       s ON s.id = p.student_id
       JOIN course_modules m ON m.id = p.module_id
       WHERE $1::BIGINT IS NULL OR p.student_id = $1
       ORDER BY s.name COLLATE \"C\", s.id, m.module_number, m.id",
    )
    .bind(student_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(ProgressEntry::from).collect())
  }

  async fn upsert_progress(&self, write: ProgressWrite) -> Result<()> {
    sqlx::query(
      "INSERT INTO progress
         (student_id, module_id, completed_units, percentage, last_updated)
       VALUES ($1, $2, $3, $4, $5)
       ON CONFLICT (student_id, module_id) DO UPDATE SET
         completed_units = EXCLUDED.completed_units,
         percentage      = EXCLUDED.percentage,
         last_updated    = EXCLUDED.last_updated",
    )
    .bind(write.student_id)
    .bind(write.module_id)
    .bind(write.completed_units)
    .bind(write.percentage)
    .bind(timestamp_now())
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  // ── Exams ─────────────────────────────────────────────────────────────────

  async fn get_exam_status(&self) -> Result<Vec<ExamEntry>> {
    let rows: Vec<ExamRow> = sqlx::query_as(
      "SELECT e.id, e.student_id, e.scheduled_date, e.passed,
              e.attempt_number, e.notes,
              s.name AS student_name
       FROM exam_status e
       JOIN students s ON s.id = e.student_id
       ORDER BY e.scheduled_date DESC NULLS LAST, e.id",
    )
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(ExamEntry::from).collect())
  }

  async fn add_exam_record(&self, input: NewExamRecord) -> Result<ExamRecord> {
    let id: i64 = sqlx::query_scalar(
      "INSERT INTO exam_status
         (student_id, scheduled_date, passed, attempt_number, notes)
       VALUES ($1, $2, $3, $4, $5)
       RETURNING id",
    )
    .bind(input.student_id)
    .bind(input.scheduled_date)
    .bind(input.passed)
    .bind(input.attempt_number)
    .bind(&input.notes)
    .fetch_one(&self.pool)
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
