//! Progress reconciliation: turning a raw update into the stored
//! `(completed_units, percentage)` pair.
//!
//! Rounding is half away from zero. Every operand is non-negative by the time
//! we divide, so the integer form `(2n + d) / 2d` is exact and never touches
//! floating point. Products are formed in `i128`; the quotient always lies in
//! `[0, total]` or `[0, 100]`, so it fits back into `i64`.

use serde::Deserialize;

use crate::{Result, ValidationError};

/// The two accepted shapes of a progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProgressInput {
  /// The caller counted units: `{"completedUnits": 7, "totalUnits": 10}`.
  #[serde(rename_all = "camelCase")]
  Count { completed_units: i64, total_units: i64 },
  /// The caller supplied a percentage: `{"percentage": 75}`.
  Percentage { percentage: i64 },
}

/// A consistent pair, ready to be written as one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
  pub completed_units: i64,
  pub percentage:      i64,
}

/// `a * b / denominator`, rounded half up.
fn mul_div_round_half_up(a: i64, b: i64, denominator: i64) -> i64 {
  let numerator = i128::from(a) * i128::from(b);
  let denominator = i128::from(denominator);
  let quotient = (2 * numerator + denominator) / (2 * denominator);
  i64::try_from(quotient).unwrap_or(i64::MAX)
}

/// Derive the completed-unit count from a percentage of `total_units`.
pub fn reconcile_from_percentage(
  percentage: i64,
  total_units: i64,
) -> Result<Reconciled> {
  if total_units <= 0 {
    return Err(ValidationError::NonPositiveTotal(total_units).into());
  }
  if !(0..=100).contains(&percentage) {
    return Err(ValidationError::PercentageOutOfRange(percentage).into());
  }

  Ok(Reconciled {
    completed_units: mul_div_round_half_up(percentage, total_units, 100),
    percentage,
  })
}

/// Derive the percentage from a completed-unit count.
pub fn reconcile_from_count(
  completed_units: i64,
  total_units: i64,
) -> Result<Reconciled> {
  if total_units <= 0 {
    return Err(ValidationError::NonPositiveTotal(total_units).into());
  }
  if !(0..=total_units).contains(&completed_units) {
    return Err(
      ValidationError::CompletedOutOfRange {
        completed: completed_units,
        total:     total_units,
      }
      .into(),
    );
  }

  Ok(Reconciled {
    completed_units,
    percentage: mul_div_round_half_up(completed_units, 100, total_units),
  })
}

/// Reconcile `input` against a module with `module_total_units` units.
///
/// A count-based update must declare the module's own total; otherwise the
/// stored pair would not be derivable from the module.
pub fn reconcile(
  input: ProgressInput,
  module_total_units: i64,
) -> Result<Reconciled> {
  match input {
    ProgressInput::Percentage { percentage } => {
      reconcile_from_percentage(percentage, module_total_units)
    }
    ProgressInput::Count { completed_units, total_units } => {
      if total_units <= 0 {
        return Err(ValidationError::NonPositiveTotal(total_units).into());
      }
      if total_units != module_total_units {
        return Err(
          ValidationError::TotalMismatch {
            declared: total_units,
            expected: module_total_units,
          }
          .into(),
        );
      }
      reconcile_from_count(completed_units, total_units)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  #[test]
  fn seventy_five_percent_of_ten_rounds_up() {
    let r = reconcile_from_percentage(75, 10).unwrap();
    assert_eq!(r, Reconciled { completed_units: 8, percentage: 75 });
  }

  #[test]
  fn bounds_map_exactly() {
    for total in 1..=300 {
      assert_eq!(reconcile_from_percentage(0, total).unwrap().completed_units, 0);
      assert_eq!(
        reconcile_from_percentage(100, total).unwrap().completed_units,
        total
      );
      assert_eq!(reconcile_from_count(0, total).unwrap().percentage, 0);
      assert_eq!(reconcile_from_count(total, total).unwrap().percentage, 100);
    }
  }

  #[test]
  fn percentage_first_stays_within_rounding_tolerance() {
    for total in 1..=120 {
      for p in 0..=100 {
        let r = reconcile_from_percentage(p, total).unwrap();
        assert!((0..=total).contains(&r.completed_units));

        let back = reconcile_from_count(r.completed_units, total).unwrap();
        // Half a unit of error on the way in, expressed in percent.
        let tolerance = 50 / total + 1;
        assert!(
          (back.percentage - p).abs() <= tolerance,
          "p={p} total={total} completed={} back={}",
          r.completed_units,
          back.percentage
        );
      }
    }
  }

  #[test]
  fn count_first_stays_in_percent_range() {
    for total in 1..=120 {
      for completed in 0..=total {
        let r = reconcile_from_count(completed, total).unwrap();
        assert!((0..=100).contains(&r.percentage));
        assert_eq!(r.completed_units, completed);
      }
    }
  }

  #[test]
  fn count_first_rounds_half_up() {
    // 1/8 = 12.5%
    assert_eq!(reconcile_from_count(1, 8).unwrap().percentage, 13);
    // 1/3 = 33.3%
    assert_eq!(reconcile_from_count(1, 3).unwrap().percentage, 33);
    // 2/3 = 66.7%
    assert_eq!(reconcile_from_count(2, 3).unwrap().percentage, 67);
  }

  #[test]
  fn rejects_out_of_range_percentage() {
    for p in [-50, -1, 101, 150] {
      assert!(matches!(
        reconcile_from_percentage(p, 10),
        Err(Error::Validation(ValidationError::PercentageOutOfRange(got))) if got == p
      ));
    }
  }

  #[test]
  fn rejects_out_of_range_count() {
    for completed in [-1, 11] {
      assert!(matches!(
        reconcile_from_count(completed, 10),
        Err(Error::Validation(ValidationError::CompletedOutOfRange { .. }))
      ));
    }
  }

  #[test]
  fn zero_total_is_rejected_before_dividing() {
    assert!(matches!(
      reconcile_from_count(0, 0),
      Err(Error::Validation(ValidationError::NonPositiveTotal(0)))
    ));
    assert!(matches!(
      reconcile_from_percentage(50, 0),
      Err(Error::Validation(ValidationError::NonPositiveTotal(0)))
    ));
  }

  #[test]
  fn count_must_match_module_total() {
    let input = ProgressInput::Count { completed_units: 3, total_units: 10 };
    assert!(matches!(
      reconcile(input, 23),
      Err(Error::Validation(ValidationError::TotalMismatch {
        declared: 10,
        expected: 23
      }))
    ));
    assert_eq!(
      reconcile(input, 10).unwrap(),
      Reconciled { completed_units: 3, percentage: 30 }
    );
  }

  #[test]
  fn huge_totals_do_not_overflow() {
    let total = i64::MAX / 50;
    assert_eq!(reconcile_from_count(total, total).unwrap().percentage, 100);
    assert_eq!(reconcile_from_count(total / 2, total).unwrap().percentage, 50);
    assert_eq!(reconcile_from_count(0, total).unwrap().percentage, 0);
    assert_eq!(
      reconcile_from_percentage(100, i64::MAX).unwrap().completed_units,
      i64::MAX
    );
    assert_eq!(
      reconcile_from_percentage(50, total).unwrap().completed_units,
      (total + 1) / 2
    );
  }

  #[test]
  fn mismatched_total_is_checked_before_arithmetic() {
    let huge = 100_000_000_000_000_000;
    let input = ProgressInput::Count { completed_units: huge, total_units: huge };
    assert!(matches!(
      reconcile(input, 23),
      Err(Error::Validation(ValidationError::TotalMismatch {
        declared: 100_000_000_000_000_000,
        expected: 23
      }))
    ));
  }

  #[test]
  fn input_deserialises_from_either_shape() {
    let pct: ProgressInput =
      serde_json::from_value(serde_json::json!({ "percentage": 40 })).unwrap();
    assert_eq!(pct, ProgressInput::Percentage { percentage: 40 });

    let count: ProgressInput = serde_json::from_value(
      serde_json::json!({ "completedUnits": 4, "totalUnits": 10 }),
    )
    .unwrap();
    assert_eq!(
      count,
      ProgressInput::Count { completed_units: 4, total_units: 10 }
    );
  }
}
