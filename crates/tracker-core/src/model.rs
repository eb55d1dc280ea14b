//! Domain records: students, course modules, progress, and exam status.
//!
//! Read types carry the display metadata joined in by the store
//! (`student_name`, `module_title`, ...) so callers never issue follow-up
//! lookups.

use chrono::{DateTime, NaiveDate, SubsecRound as _, Utc};
use serde::{Deserialize, Serialize};

/// The current time at microsecond precision, the finest both engines keep.
/// Stores stamp rows with this rather than a database clock.
pub fn timestamp_now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

// ─── Students ────────────────────────────────────────────────────────────────

/// A student enrolled in the course. Rows are only ever added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
  pub id:          i64,
  pub name:        String,
  pub email:       Option<String>,
  /// Login secret; never included in serialised listings.
  #[serde(skip_serializing, default)]
  pub access_code: String,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::ProgressStore::add_student`].
///
/// Fields are expected to be validated already (see [`crate::validate`]).
#[derive(Debug, Clone)]
pub struct NewStudent {
  pub name:        String,
  pub email:       Option<String>,
  /// Caller-supplied code; the store generates one when `None`.
  pub access_code: Option<String>,
}

/// What the store hands back after a successful insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedStudent {
  pub id:          i64,
  pub access_code: String,
}

// ─── Course modules ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
  pub id:               i64,
  pub module_number:    i64,
  pub title:            String,
  /// Denominator for completion.
  pub total_units:      i64,
  pub duration_minutes: i64,
}

// ─── Progress ────────────────────────────────────────────────────────────────

/// The canonical pair written for one (student, module) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressWrite {
  pub student_id:      i64,
  pub module_id:       i64,
  pub completed_units: i64,
  pub percentage:      i64,
}

/// A stored progress record joined with student and module metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
  pub student_id:      i64,
  pub module_id:       i64,
  pub completed_units: i64,
  pub percentage:      i64,
  pub last_updated:    DateTime<Utc>,
  pub student_name:    String,
  pub module_number:   i64,
  pub module_title:    String,
  pub total_units:     i64,
}

// ─── Exams ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
  pub id:             i64,
  pub student_id:     i64,
  pub scheduled_date: Option<NaiveDate>,
  pub passed:         bool,
  pub attempt_number: i64,
  pub notes:          Option<String>,
}

/// Input to [`crate::store::ProgressStore::add_exam_record`].
#[derive(Debug, Clone)]
pub struct NewExamRecord {
  pub student_id:     i64,
  pub scheduled_date: Option<NaiveDate>,
  pub passed:         bool,
  pub attempt_number: i64,
  pub notes:          Option<String>,
}

impl NewExamRecord {
  /// First attempt, not yet passed, no date or notes.
  pub fn new(student_id: i64) -> Self {
    Self {
      student_id,
      scheduled_date: None,
      passed: false,
      attempt_number: 1,
      notes: None,
    }
  }
}

/// An exam record joined with the student's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamEntry {
  #[serde(flatten)]
  pub exam:         ExamRecord,
  pub student_name: String,
}
