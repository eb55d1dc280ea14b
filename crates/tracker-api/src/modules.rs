//! `GET /modules`: the course outline, ordered by module number.

use axum::{Json, extract::State};
use tracker_core::{model::CourseModule, store::ProgressStore};

use crate::{
  AppState,
  error::{ApiError, store_error},
};

pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CourseModule>>, ApiError>
where
  S: ProgressStore,
{
  let modules = state.store.list_modules().await.map_err(store_error)?;
  Ok(Json(modules))
}
