//! `GET /status`: which engine is active and who the caller is.

use axum::{Json, extract::State};
use serde::Serialize;
use tracker_core::{session::SessionIdentity, store::ProgressStore};

use crate::{AppState, auth::Session};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
  pub database: &'static str,
  pub session:  SessionIdentity,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Session(identity): Session,
) -> Json<StatusResponse>
where
  S: ProgressStore,
{
  Json(StatusResponse {
    database: state.store.database_kind(),
    session:  identity,
  })
}
