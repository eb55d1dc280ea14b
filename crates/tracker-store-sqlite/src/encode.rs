//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; exam dates are `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use tracker_core::model::{
  CourseModule, ExamEntry, ExamRecord, ProgressEntry, Student,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawStudent::from_row`].
pub const STUDENT_COLUMNS: &str = "id, name, email, access_code, created_at";

/// Raw values read directly from a `students` row.
pub struct RawStudent {
  pub id:          i64,
  pub name:        String,
  pub email:       Option<String>,
  pub access_code: String,
  pub created_at:  String,
}

impl RawStudent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      email:       row.get(2)?,
      access_code: row.get(3)?,
      created_at:  row.get(4)?,
    })
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      id:          self.id,
      name:        self.name,
      email:       self.email,
      access_code: self.access_code,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Column list matching [`module_from_row`].
pub const MODULE_COLUMNS: &str =
  "id, module_number, title, total_units, duration_minutes";

pub fn module_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CourseModule> {
  Ok(CourseModule {
    id:               row.get(0)?,
    module_number:    row.get(1)?,
    title:            row.get(2)?,
    total_units:      row.get(3)?,
    duration_minutes: row.get(4)?,
  })
}

/// Raw values read from a `progress` row joined with students and modules.
pub struct RawProgress {
  pub student_id:      i64,
  pub module_id:       i64,
  pub completed_units: i64,
  pub percentage:      i64,
  pub last_updated:    String,
  pub student_name:    String,
  pub module_number:   i64,
  pub module_title:    String,
  pub total_units:     i64,
}

impl RawProgress {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      student_id:      row.get(0)?,
      module_id:       row.get(1)?,
      completed_units: row.get(2)?,
      percentage:      row.get(3)?,
      last_updated:    row.get(4)?,
      student_name:    row.get(5)?,
      module_number:   row.get(6)?,
      module_title:    row.get(7)?,
      total_units:     row.get(8)?,
    })
  }

  pub fn into_entry(self) -> Result<ProgressEntry> {
    Ok(ProgressEntry {
      student_id:      self.student_id,
      module_id:       self.module_id,
      completed_units: self.completed_units,
      percentage:      self.percentage,
      last_updated:    decode_dt(&self.last_updated)?,
      student_name:    self.student_name,
      module_number:   self.module_number,
      module_title:    self.module_title,
      total_units:     self.total_units,
    })
  }
}

/// Raw values read from an `exam_status` row joined with the student name.
pub struct RawExam {
  pub id:             i64,
  pub student_id:     i64,
  pub scheduled_date: Option<String>,
  pub passed:         bool,
  pub attempt_number: i64,
  pub notes:          Option<String>,
  pub student_name:   String,
}

impl RawExam {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      student_id:     row.get(1)?,
      scheduled_date: row.get(2)?,
      passed:         row.get(3)?,
      attempt_number: row.get(4)?,
      notes:          row.get(5)?,
      student_name:   row.get(6)?,
    })
  }

  pub fn into_entry(self) -> Result<ExamEntry> {
    Ok(ExamEntry {
      exam:         ExamRecord {
        id:             self.id,
        student_id:     self.student_id,
        scheduled_date: self.scheduled_date.as_deref().map(decode_date).transpose()?,
        passed:         self.passed,
        attempt_number: self.attempt_number,
        notes:          self.notes,
      },
      student_name: self.student_name,
    })
  }
}
