//! Handlers for `/progress` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/progress` | Public. Optional `?studentId=<id>` |
//! | `POST` | `/progress` | Admin, or the student themself. Body: [`UpdateBody`] |

use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracker_core::{
  model::ProgressEntry,
  ops::{self, ProgressUpdate},
  progress::ProgressInput,
  store::ProgressStore,
};

use crate::{
  AppState,
  auth::Session,
  error::{ApiError, store_error},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub student_id: Option<i64>,
}

/// `GET /progress[?studentId=<id>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ProgressEntry>>, ApiError>
where
  S: ProgressStore,
{
  let entries = state
    .store
    .get_progress(params.student_id)
    .await
    .map_err(store_error)?;
  Ok(Json(entries))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// Either `{"studentId", "moduleId", "percentage"}` or
/// `{"studentId", "moduleId", "completedUnits", "totalUnits"}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  pub student_id: i64,
  pub module_id:  i64,
  #[serde(flatten)]
  pub input:      ProgressInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
  pub success:         bool,
  pub completed_units: i64,
  pub percentage:      i64,
}

/// `POST /progress`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  Session(identity): Session,
  body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError>
where
  S: ProgressStore,
{
  let Json(body) = body?;
  let reconciled = ops::update_progress(
    state.store.as_ref(),
    identity,
    ProgressUpdate {
      student_id: body.student_id,
      module_id:  body.module_id,
      input:      body.input,
    },
  )
  .await?;

  Ok(Json(UpdateResponse {
    success:         true,
    completed_units: reconciled.completed_units,
    percentage:      reconciled.percentage,
  }))
}
