//! Handlers for `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/login` | Body: `{"type":"admin","password":…}` or `{"type":"student","accessCode":…}` |
//! | `POST` | `/auth/logout` | Clears the session cookie |
//!
//! A successful login returns the token in the body and also sets it as the
//! `auth-token` cookie.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::{HeaderValue, header},
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracker_core::{session::SessionIdentity, store::ProgressStore};

use crate::{
  AppState,
  auth::{SESSION_COOKIE, verify_access_code, verify_admin_secret},
  error::ApiError,
};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LoginBody {
  Admin {
    password: String,
  },
  Student {
    #[serde(rename = "accessCode")]
    access_code: String,
  },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
  pub success:      bool,
  pub token:        String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub student_id:   Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub student_name: Option<String>,
}

fn session_cookie(token: &str) -> Option<HeaderValue> {
  HeaderValue::from_str(&format!(
    "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax"
  ))
  .ok()
}

/// `POST /auth/login`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Response, ApiError>
where
  S: ProgressStore,
{
  let Json(body) = body?;

  let (identity, student_name) = match body {
    LoginBody::Admin { password } => {
      if !verify_admin_secret(&password, &state.auth) {
        warn!("rejected administrator login");
        return Err(ApiError::InvalidCredentials);
      }
      (SessionIdentity::Admin, None)
    }
    LoginBody::Student { access_code } => {
      let student = verify_access_code(state.store.as_ref(), &access_code)
        .await
        .inspect_err(|_| warn!("rejected student login"))?;
      (SessionIdentity::Student { id: student.id }, Some(student.name))
    }
  };

  let token = identity.encode().ok_or(ApiError::InvalidCredentials)?;
  let student_id = match identity {
    SessionIdentity::Student { id } => Some(id),
    SessionIdentity::Admin | SessionIdentity::Viewer => None,
  };
  info!(?identity, "login");

  let mut response = Json(LoginResponse {
    success: true,
    token: token.clone(),
    student_id,
    student_name,
  })
  .into_response();
  if let Some(cookie) = session_cookie(&token) {
    response.headers_mut().insert(header::SET_COOKIE, cookie);
  }
  Ok(response)
}

/// `POST /auth/logout`
pub async fn logout() -> impl IntoResponse {
  (
    [(
      header::SET_COOKIE,
      format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
    )],
    Json(serde_json::json!({ "success": true })),
  )
}
