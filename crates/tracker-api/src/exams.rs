//! Handlers for `/exams` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/exams` | Public; latest scheduled date first |
//! | `POST` | `/exams` | Admin only. Body: [`CreateBody`] |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracker_core::{
  model::{ExamEntry, NewExamRecord},
  ops,
  store::ProgressStore,
};

use crate::{
  AppState,
  auth::Session,
  error::{ApiError, store_error},
};

/// `GET /exams`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<ExamEntry>>, ApiError>
where
  S: ProgressStore,
{
  let entries = state.store.get_exam_status().await.map_err(store_error)?;
  Ok(Json(entries))
}

fn first_attempt() -> i64 { 1 }

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub student_id:     i64,
  /// `YYYY-MM-DD`
  pub scheduled_date: Option<NaiveDate>,
  #[serde(default)]
  pub passed:         bool,
  #[serde(default = "first_attempt")]
  pub attempt_number: i64,
  pub notes:          Option<String>,
}

/// `POST /exams`: returns 201 with the stored record.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Session(identity): Session,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProgressStore,
{
  let Json(body) = body?;
  let record = ops::record_exam(state.store.as_ref(), identity, NewExamRecord {
    student_id:     body.student_id,
    scheduled_date: body.scheduled_date,
    passed:         body.passed,
    attempt_number: body.attempt_number,
    notes:          body.notes,
  })
  .await?;

  Ok((StatusCode::CREATED, Json(record)))
}
