//! Student access codes: a short name prefix plus four digits, e.g. `JOH4821`.

use rand_core::RngCore;

/// Normalise a code for storage and lookup.
pub fn normalize(code: &str) -> String { code.trim().to_uppercase() }

/// Generate a code from the first three characters of `name`.
///
/// Only ASCII letters from that prefix are kept. Names that yield fewer than
/// two letters are padded with `X`. Collisions are not checked here; the store
/// reports them as a unique violation.
pub fn generate(name: &str, rng: &mut impl RngCore) -> String {
  let mut prefix: String = name
    .trim()
    .chars()
    .take(3)
    .filter(char::is_ascii_alphabetic)
    .map(|c| c.to_ascii_uppercase())
    .collect();
  while prefix.len() < 2 {
    prefix.push('X');
  }

  let suffix = 1000 + rng.next_u32() % 9000;
  format!("{prefix}{suffix}")
}

#[cfg(test)]
mod tests {
  use rand_core::OsRng;

  use super::*;

  /// Every generated code has the shape `[A-Z]{2,3}[0-9]{4}`.
  fn assert_shape(code: &str) {
    let prefix_len = code.len() - 4;
    assert!((2..=3).contains(&prefix_len), "{code}");
    assert!(code[..prefix_len].bytes().all(|b| b.is_ascii_uppercase()), "{code}");
    assert!(code[prefix_len..].bytes().all(|b| b.is_ascii_digit()), "{code}");
  }

  #[test]
  fn three_letter_prefix() {
    let code = generate("John Doe", &mut OsRng);
    assert_shape(&code);
    assert!(code.starts_with("JOH"));
  }

  #[test]
  fn short_names_keep_short_prefix() {
    let code = generate("Al", &mut OsRng);
    assert_shape(&code);
    assert!(code.starts_with("AL"));
    assert_eq!(code.len(), 6);
  }

  #[test]
  fn non_letters_are_dropped_and_padded() {
    let code = generate("J. Smith", &mut OsRng);
    assert_shape(&code);
    assert!(code.starts_with("JX"));

    let code = generate("42", &mut OsRng);
    assert_shape(&code);
    assert!(code.starts_with("XX"));
  }

  #[test]
  fn suffix_is_four_digits() {
    for _ in 0..200 {
      let code = generate("Maria", &mut OsRng);
      assert_shape(&code);
      let n: u32 = code[3..].parse().unwrap();
      assert!((1000..=9999).contains(&n));
    }
  }

  #[test]
  fn normalize_uppercases_and_trims() {
    assert_eq!(normalize("  joh1234 "), "JOH1234");
  }
}
