//! The fixed course outline seeded into an empty `course_modules` table.

/// One seed row; the store assigns the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSeed {
  pub module_number:    i64,
  pub title:            &'static str,
  pub total_units:      i64,
  pub duration_minutes: i64,
}

const fn seed(module_number: i64, title: &'static str, total_units: i64) -> ModuleSeed {
  ModuleSeed { module_number, title, total_units, duration_minutes: 0 }
}

/// Eleven sections, 238 lectures.
pub const CURRICULUM: &[ModuleSeed] = &[
  seed(1, "Key Concepts", 23),
  seed(2, "Agile Practice Guide - Introduction", 7),
  seed(3, "Agile Practice Guide - Teams and Practices", 6),
  seed(4, "Agile Practice Guide - Core Practices", 6),
  seed(5, "Agile Practice Guide - Frameworks", 7),
  seed(6, "Agile Practice Guide - Scaling and Advanced Topics", 9),
  seed(7, "Example Projects", 11),
  seed(8, "Planning", 52),
  seed(9, "Executing and Monitoring", 54),
  seed(10, "PMBOK 7th Edition", 43),
  seed(11, "PMP Fast Track and Practice Exams", 20),
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numbered_in_order_with_positive_totals() {
    for (i, module) in CURRICULUM.iter().enumerate() {
      assert_eq!(module.module_number, i as i64 + 1);
      assert!(module.total_units > 0, "{}", module.title);
    }
    assert_eq!(CURRICULUM.iter().map(|m| m.total_units).sum::<i64>(), 238);
  }
}
