//! Credential verification and session extraction.
//!
//! The administrator secret is checked against an argon2 PHC hash from the
//! server configuration. Students log in with their access code. Either way
//! the client receives a session token (see [`tracker_core::session`]) and
//! presents it as the `auth-token` cookie or an `Authorization: Bearer`
//! header.

use std::convert::Infallible;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use tracker_core::{model::Student, session::SessionIdentity, store::ProgressStore};

use crate::error::{ApiError, store_error};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "auth-token";

/// Credentials accepted as valid for this server instance.
#[derive(Clone, Default)]
pub struct AuthConfig {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`. Administrator
  /// login is disabled when unset.
  pub admin_password_hash: Option<String>,
}

/// Check `secret` against the configured administrator hash.
pub fn verify_admin_secret(secret: &str, config: &AuthConfig) -> bool {
  let Some(hash) = config.admin_password_hash.as_deref() else {
    return false;
  };
  let Ok(parsed_hash) = PasswordHash::new(hash) else {
    return false;
  };

  Argon2::default()
    .verify_password(secret.as_bytes(), &parsed_hash)
    .is_ok()
}

/// Resolve an access code to its student, or fail with invalid credentials.
pub async fn verify_access_code<S: ProgressStore>(
  store: &S,
  code: &str,
) -> Result<Student, ApiError> {
  store
    .get_student_by_access_code(code)
    .await
    .map_err(store_error)?
    .ok_or(ApiError::InvalidCredentials)
}

/// Pull the raw session token from a bearer header or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
  let bearer = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim);
  if bearer.is_some() {
    return bearer;
  }

  headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(';'))
    .filter_map(|pair| pair.trim().split_once('='))
    .find(|(name, _)| *name == SESSION_COOKIE)
    .map(|(_, value)| value)
}

/// The decoded identity of the caller. Never rejects: a request without a
/// recognised token is a [`SessionIdentity::Viewer`].
pub struct Session(pub SessionIdentity);

impl<S> FromRequestParts<S> for Session
where
  S: Send + Sync,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    _state: &S,
  ) -> Result<Self, Self::Rejection> {
    Ok(Session(SessionIdentity::decode(session_token(&parts.headers))))
  }
}

#[cfg(test)]
mod tests {
  use argon2::{PasswordHasher, password_hash::SaltString};
  use axum::http::HeaderValue;
  use rand_core::OsRng;

  use super::*;

  fn config(password: &str) -> AuthConfig {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();
    AuthConfig { admin_password_hash: Some(hash) }
  }

  #[test]
  fn correct_admin_secret() {
    assert!(verify_admin_secret("secret", &config("secret")));
  }

  #[test]
  fn wrong_admin_secret() {
    assert!(!verify_admin_secret("wrong", &config("secret")));
  }

  #[test]
  fn unset_or_malformed_hash_rejects_everything() {
    assert!(!verify_admin_secret("", &AuthConfig::default()));
    let malformed = AuthConfig { admin_password_hash: Some("not-a-phc".into()) };
    assert!(!verify_admin_secret("not-a-phc", &malformed));
  }

  #[test]
  fn token_from_bearer_header() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer student-4"));
    assert_eq!(session_token(&headers), Some("student-4"));
  }

  #[test]
  fn token_from_cookie() {
    let mut headers = HeaderMap::new();
    headers.insert(
      header::COOKIE,
      HeaderValue::from_static("theme=dark; auth-token=authenticated-admin"),
    );
    assert_eq!(session_token(&headers), Some("authenticated-admin"));
  }

  #[test]
  fn no_token() {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
    assert_eq!(session_token(&headers), None);
    assert_eq!(session_token(&HeaderMap::new()), None);
  }
}
