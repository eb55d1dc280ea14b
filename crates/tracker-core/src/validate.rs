//! Field validation for student enrolment.

use std::sync::LazyLock;

use regex::Regex;

use crate::ValidationError;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Trim and check a display name. `None` and blank names are "missing".
pub fn student_name(name: Option<&str>) -> Result<String, ValidationError> {
  let name = name.map(str::trim).unwrap_or_default();
  if name.is_empty() {
    return Err(ValidationError::MissingName);
  }

  let len = name.chars().count();
  if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
    return Err(ValidationError::NameLength(len));
  }

  Ok(name.to_owned())
}

/// Trim and check an optional email. Blank input counts as absent.
pub fn email(email: Option<&str>) -> Result<Option<String>, ValidationError> {
  let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
    return Ok(None);
  };

  if is_email_shaped(email) {
    Ok(Some(email.to_owned()))
  } else {
    Err(ValidationError::InvalidEmail(email.to_owned()))
  }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot inside the domain.
fn is_email_shaped(email: &str) -> bool { EMAIL_REGEX.is_match(email) }
