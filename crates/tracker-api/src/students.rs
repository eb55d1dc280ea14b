//! Handlers for `/students` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/students` | Public; ordered by name; access codes omitted |
//! | `POST` | `/students` | Admin only. Body: `{"name":…, "email":…?}` |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracker_core::{model::Student, ops, store::ProgressStore};

use crate::{
  AppState,
  auth::Session,
  error::{ApiError, store_error},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /students`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: ProgressStore,
{
  let students = state.store.list_students().await.map_err(store_error)?;
  Ok(Json(students))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Both fields are optional here so that a missing name is reported as a
/// validation error rather than a parse failure.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:  Option<String>,
  pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
  pub success:     bool,
  pub id:          i64,
  pub access_code: String,
}

/// `POST /students`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Session(identity): Session,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProgressStore,
{
  let Json(body) = body?;
  let created = ops::enroll_student(
    state.store.as_ref(),
    identity,
    body.name.as_deref(),
    body.email.as_deref(),
  )
  .await?;

  Ok((
    StatusCode::CREATED,
    Json(CreateResponse {
      success:     true,
      id:          created.id,
      access_code: created.access_code,
    }),
  ))
}
