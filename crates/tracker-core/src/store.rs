//! The `ProgressStore` trait.
//!
//! The trait is implemented by storage engines (`tracker-store-sqlite`,
//! `tracker-store-postgres`). Higher layers depend on this abstraction, not on
//! any concrete engine, and must not be able to tell which one is active
//! except through [`ProgressStore::database_kind`].

use std::future::Future;

use crate::model::{
  CourseModule, CreatedStudent, ExamEntry, ExamRecord, NewExamRecord,
  NewStudent, ProgressEntry, ProgressWrite, Student,
};

/// Abstraction over a progress store engine.
///
/// Every method is a single point query or statement; nothing here spans a
/// transaction across calls. Engine errors convert into [`crate::Error`] so
/// that unique and foreign-key violations are classified the same way
/// everywhere.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ProgressStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  /// Human-readable label for the active engine. Diagnostic only.
  fn database_kind(&self) -> &'static str;

  /// Create the schema if absent and seed the curriculum into an empty
  /// module table. Safe to call on every startup.
  fn initialize(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Students ──────────────────────────────────────────────────────────

  /// All students, ordered by name (byte order), then id.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  fn get_student(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// Insert a student, generating an access code when none is supplied.
  ///
  /// A duplicate email or access code is a unique violation; the store does
  /// not retry with a fresh code.
  fn add_student(
    &self,
    input: NewStudent,
  ) -> impl Future<Output = Result<CreatedStudent, Self::Error>> + Send + '_;

  /// Look up a student by access code. The code is case-normalised first.
  fn get_student_by_access_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + 'a;

  // ── Modules ───────────────────────────────────────────────────────────

  /// All modules, ordered by module number.
  fn list_modules(
    &self,
  ) -> impl Future<Output = Result<Vec<CourseModule>, Self::Error>> + Send + '_;

  fn get_module(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<CourseModule>, Self::Error>> + Send + '_;

  // ── Progress ──────────────────────────────────────────────────────────

  /// Progress records joined with student and module metadata, ordered by
  /// student name then module number. Scoped to one student when given.
  fn get_progress(
    &self,
    student_id: Option<i64>,
  ) -> impl Future<Output = Result<Vec<ProgressEntry>, Self::Error>> + Send + '_;

  /// Insert or overwrite the record for `(student_id, module_id)`, setting
  /// `last_updated` to now. Unknown ids are a constraint violation.
  fn upsert_progress(
    &self,
    write: ProgressWrite,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Exams ─────────────────────────────────────────────────────────────

  /// Exam records joined with student name, latest scheduled date first.
  /// Undated records sort last.
  fn get_exam_status(
    &self,
  ) -> impl Future<Output = Result<Vec<ExamEntry>, Self::Error>> + Send + '_;

  fn add_exam_record(
    &self,
    input: NewExamRecord,
  ) -> impl Future<Output = Result<ExamRecord, Self::Error>> + Send + '_;
}
