//! Guarded operations: authorization, validation, then a single store call.
//!
//! Every mutating entry point of the HTTP layer goes through one of these
//! functions. Nothing is written unless the identity check and input
//! validation have both passed.

use tracing::debug;

use crate::{
  Error, Result, ValidationError,
  model::{CreatedStudent, ExamRecord, NewExamRecord, NewStudent, ProgressWrite},
  progress::{self, ProgressInput, Reconciled},
  session::SessionIdentity,
  store::ProgressStore,
  validate,
};

/// A progress update addressed to one (student, module) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
  pub student_id: i64,
  pub module_id:  i64,
  pub input:      ProgressInput,
}

/// Authorize, reconcile, and upsert a progress update.
///
/// Returns the pair that was written.
pub async fn update_progress<S: ProgressStore>(
  store: &S,
  identity: SessionIdentity,
  update: ProgressUpdate,
) -> Result<Reconciled> {
  identity.require_can_modify(update.student_id)?;

  let module = store
    .get_module(update.module_id)
    .await
    .map_err(Into::<Error>::into)?
    .ok_or_else(|| Error::NotFound(format!("module {}", update.module_id)))?;

  let reconciled = progress::reconcile(update.input, module.total_units)?;

  store
    .upsert_progress(ProgressWrite {
      student_id:      update.student_id,
      module_id:       module.id,
      completed_units: reconciled.completed_units,
      percentage:      reconciled.percentage,
    })
    .await
    .map_err(|e| missing_student(e.into(), update.student_id))?;

  debug!(
    student_id = update.student_id,
    module_id = update.module_id,
    completed = reconciled.completed_units,
    percentage = reconciled.percentage,
    "progress updated"
  );
  Ok(reconciled)
}

/// Validate and insert a new student. Administrators only.
pub async fn enroll_student<S: ProgressStore>(
  store: &S,
  identity: SessionIdentity,
  name: Option<&str>,
  email: Option<&str>,
) -> Result<CreatedStudent> {
  identity.require_admin()?;

  let name = validate::student_name(name)?;
  let email = validate::email(email)?;

  let created = store
    .add_student(NewStudent { name, email, access_code: None })
    .await
    .map_err(Into::<Error>::into)?;

  debug!(student_id = created.id, "student enrolled");
  Ok(created)
}

/// Record an exam attempt. Administrators only.
pub async fn record_exam<S: ProgressStore>(
  store: &S,
  identity: SessionIdentity,
  input: NewExamRecord,
) -> Result<ExamRecord> {
  identity.require_admin()?;

  if input.attempt_number < 1 {
    return Err(ValidationError::InvalidAttempt(input.attempt_number).into());
  }

  let student_id = input.student_id;
  store
    .add_exam_record(input)
    .await
    .map_err(|e| missing_student(e.into(), student_id))
}

/// A dangling reference on a write whose other ids were already checked can
/// only be the student.
fn missing_student(err: Error, student_id: i64) -> Error {
  match err {
    Error::ConstraintViolation(_) => {
      Error::NotFound(format!("student {student_id}"))
    }
    other => other,
  }
}
