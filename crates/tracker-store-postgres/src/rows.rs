//! Row types decoded by `sqlx` and their conversions into domain records.

use chrono::{DateTime, NaiveDate, Utc};
use tracker_core::model::{
  CourseModule, ExamEntry, ExamRecord, ProgressEntry, Student,
};

#[derive(sqlx::FromRow)]
pub struct StudentRow {
  pub id:          i64,
  pub name:        String,
  pub email:       Option<String>,
  pub access_code: String,
  pub created_at:  DateTime<Utc>,
}

impl From<StudentRow> for Student {
  fn from(row: StudentRow) -> Self {
    Self {
      id:          row.id,
      name:        row.name,
      email:       row.email,
      access_code: row.access_code,
      created_at:  row.created_at,
    }
  }
}

#[derive(sqlx::FromRow)]
pub struct ModuleRow {
  pub id:               i64,
  pub module_number:    i64,
  pub title:            String,
  pub total_units:      i64,
  pub duration_minutes: i64,
}

impl From<ModuleRow> for CourseModule {
  fn from(row: ModuleRow) -> Self {
    Self {
      id:               row.id,
      module_number:    row.module_number,
      title:            row.title,
      total_units:      row.total_units,
      duration_minutes: row.duration_minutes,
    }
  }
}

#[derive(sqlx::FromRow)]
pub struct ProgressRow {
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

impl From<ProgressRow> for ProgressEntry {
  fn from(row: ProgressRow) -> Self {
    Self {
      student_id:      row.student_id,
      module_id:       row.module_id,
      completed_units: row.completed_units,
      percentage:      row.percentage,
      last_updated:    row.last_updated,
      student_name:    row.student_name,
      module_number:   row.module_number,
      module_title:    row.module_title,
      total_units:     row.total_units,
    }
  }
}

#[derive(sqlx::FromRow)]
pub struct ExamRow {
  pub id:             i64,
  pub student_id:     i64,
  pub scheduled_date: Option<NaiveDate>,
  pub passed:         bool,
  pub attempt_number: i64,
  pub notes:          Option<String>,
  pub student_name:   String,
}

impl From<ExamRow> for ExamEntry {
  fn from(row: ExamRow) -> Self {
    Self {
      exam:         ExamRecord {
        id:             row.id,
        student_id:     row.student_id,
        scheduled_date: row.scheduled_date,
        passed:         row.passed,
        attempt_number: row.attempt_number,
        notes:          row.notes,
      },
      student_name: row.student_name,
    }
  }
}
