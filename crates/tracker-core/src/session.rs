//! Session tokens and the authorization predicate.
//!
//! Tokens are plain strings with no signature and no expiry: the admin
//! sentinel, `student-<id>`, or nothing at all. Anyone who can guess a student
//! id can present that student's token. Decoding never fails; unrecognised
//! input is simply a [`SessionIdentity::Viewer`].

use serde::Serialize;

use crate::{Error, Result};

/// Token minted for a successful administrator login.
pub const ADMIN_TOKEN: &str = "authenticated-admin";

/// Prefix of tokens minted for a successful student login.
pub const STUDENT_TOKEN_PREFIX: &str = "student-";

/// Who is making a request. Reconstructed from the token on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SessionIdentity {
  Admin,
  Student {
    #[serde(rename = "studentId")]
    id: i64,
  },
  Viewer,
}

impl SessionIdentity {
  /// Decode a session token. Total over all inputs.
  pub fn decode(token: Option<&str>) -> Self {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
      return Self::Viewer;
    };

    if token == ADMIN_TOKEN {
      return Self::Admin;
    }

    token
      .strip_prefix(STUDENT_TOKEN_PREFIX)
      .filter(|suffix| {
        !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit())
      })
      .and_then(|suffix| suffix.parse::<i64>().ok())
      .map_or(Self::Viewer, |id| Self::Student { id })
  }

  /// The token that decodes back to this identity; `None` for a viewer.
  pub fn encode(&self) -> Option<String> {
    match self {
      Self::Admin => Some(ADMIN_TOKEN.to_owned()),
      Self::Student { id } => Some(format!("{STUDENT_TOKEN_PREFIX}{id}")),
      Self::Viewer => None,
    }
  }

  /// Whether this identity may write progress for `target_student_id`.
  pub fn can_modify(&self, target_student_id: i64) -> bool {
    match self {
      Self::Admin => true,
      Self::Student { id } => *id == target_student_id,
      Self::Viewer => false,
    }
  }

  /// Whether the request carries a recognised session at all.
  pub fn is_authorized(&self) -> bool {
    match self {
      Self::Admin | Self::Student { .. } => true,
      Self::Viewer => false,
    }
  }

  /// [`Self::can_modify`] as a `Result`, separating "not signed in" from
  /// "signed in as someone else".
  pub fn require_can_modify(&self, target_student_id: i64) -> Result<()> {
    match self {
      Self::Viewer => Err(Error::Unauthenticated),
      _ if self.can_modify(target_student_id) => Ok(()),
      _ => Err(Error::Forbidden(format!(
        "cannot modify progress for student {target_student_id}"
      ))),
    }
  }

  pub fn require_admin(&self) -> Result<()> {
    match self {
      Self::Admin => Ok(()),
      Self::Student { .. } => {
        Err(Error::Forbidden("administrator access required".into()))
      }
      Self::Viewer => Err(Error::Unauthenticated),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decode_known_tokens() {
    assert_eq!(
      SessionIdentity::decode(Some("authenticated-admin")),
      SessionIdentity::Admin
    );
    assert_eq!(
      SessionIdentity::decode(Some("student-5")),
      SessionIdentity::Student { id: 5 }
    );
    assert_eq!(
      SessionIdentity::decode(Some("student-0")),
      SessionIdentity::Student { id: 0 }
    );
  }

  #[test]
  fn decode_falls_back_to_viewer() {
    for token in [
      None,
      Some(""),
      Some("student-"),
      Some("student-abc"),
      Some("student-5abc"),
      Some("student--5"),
      Some("student-+5"),
      Some("student- 5"),
      Some("student-99999999999999999999999"),
      Some("authenticated-admin "),
      Some("Authenticated-Admin"),
      Some("admin"),
    ] {
      assert_eq!(
        SessionIdentity::decode(token),
        SessionIdentity::Viewer,
        "token {token:?}"
      );
    }
  }

  #[test]
  fn encode_roundtrips_through_decode() {
    for identity in [
      SessionIdentity::Admin,
      SessionIdentity::Student { id: 42 },
      SessionIdentity::Viewer,
    ] {
      let token = identity.encode();
      assert_eq!(SessionIdentity::decode(token.as_deref()), identity);
    }
  }

  #[test]
  fn admin_can_modify_anyone() {
    for id in [-1, 0, 1, 5, i64::MAX] {
      assert!(SessionIdentity::Admin.can_modify(id));
    }
  }

  #[test]
  fn student_can_modify_only_self() {
    let student = SessionIdentity::Student { id: 5 };
    assert!(student.can_modify(5));
    assert!(!student.can_modify(6));
  }

  #[test]
  fn viewer_cannot_modify() {
    for id in [-1, 0, 1, 5, i64::MAX] {
      assert!(!SessionIdentity::Viewer.can_modify(id));
    }
  }

  #[test]
  fn is_authorized_by_tier() {
    assert!(SessionIdentity::Admin.is_authorized());
    assert!(SessionIdentity::Student { id: 1 }.is_authorized());
    assert!(!SessionIdentity::Viewer.is_authorized());
  }

  #[test]
  fn require_can_modify_distinguishes_failures() {
    assert!(SessionIdentity::Student { id: 2 }.require_can_modify(2).is_ok());
    assert!(matches!(
      SessionIdentity::Student { id: 2 }.require_can_modify(3),
      Err(Error::Forbidden(_))
    ));
    assert!(matches!(
      SessionIdentity::Viewer.require_can_modify(3),
      Err(Error::Unauthenticated)
    ));
  }

  #[test]
  fn require_admin_by_tier() {
    assert!(SessionIdentity::Admin.require_admin().is_ok());
    assert!(matches!(
      SessionIdentity::Student { id: 1 }.require_admin(),
      Err(Error::Forbidden(_))
    ));
    assert!(matches!(
      SessionIdentity::Viewer.require_admin(),
      Err(Error::Unauthenticated)
    ));
  }

  #[test]
  fn serialises_as_tagged_object() {
    let json = serde_json::to_value(SessionIdentity::Student { id: 7 }).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "student", "studentId": 7 }));
  }
}
