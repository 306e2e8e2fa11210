//! Working precision, measured in significant decimal digits.
//!
//! Every evaluation in the workspace takes a [`Precision`] argument instead of
//! reading a process-wide setting, so key derivation and evaluation can never
//! disagree about how many digits are in force.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Extra digits carried internally beyond the requested precision.
///
/// Results are rendered at the requested precision, so the guard digits
/// absorb the rounding error accumulated by long collapses.
pub const GUARD_DIGITS: usize = 10;

/// Number of trailing digits ignored when two values are compared.
pub const COMPARISON_MARGIN: usize = 2;

/// Smallest precision that still leaves a digit to compare.
pub const MIN_DIGITS: usize = COMPARISON_MARGIN + 1;

/// A decimal working precision.
///
/// Deserialized values pass through [`Precision::new`], so the minimum holds
/// for configuration input too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct Precision(usize);

impl Precision {
    /// The default precision of a search: 15 significant digits.
    pub const DEFAULT: Self = Self(15);

    /// Creates a precision of `digits` significant digits.
    ///
    /// Values below [`MIN_DIGITS`] are raised to it.
    #[must_use]
    pub const fn new(digits: usize) -> Self {
        if digits < MIN_DIGITS {
            Self(MIN_DIGITS)
        } else {
            Self(digits)
        }
    }

    /// Returns the number of significant digits rendered at this precision.
    #[must_use]
    pub const fn digits(self) -> usize {
        self.0
    }

    /// Returns the number of digits used internally while evaluating.
    #[must_use]
    pub const fn working_digits(self) -> usize {
        self.0 + GUARD_DIGITS
    }

    /// Returns the number of leading digits that must agree for two values
    /// to be considered equal at this precision.
    #[must_use]
    pub const fn comparison_digits(self) -> usize {
        self.0.saturating_sub(COMPARISON_MARGIN)
    }

    /// Doubles the precision, capped at `ceiling`. Never lowers it.
    #[must_use]
    pub fn doubled(self, ceiling: Self) -> Self {
        Self(self.0.saturating_mul(2).min(ceiling.0).max(self.0))
    }

    /// Scales a count proportionally to how far this precision is above `base`.
    ///
    /// Used to deepen truncated expansions when precision grows.
    #[must_use]
    pub fn scale(self, base: Self, count: i64) -> i64 {
        if self.0 <= base.0 {
            return count;
        }
        let scaled = i128::from(count) * self.0 as i128 / base.0 as i128;
        i64::try_from(scaled).unwrap_or(i64::MAX)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} digits", self.0)
    }
}

impl From<usize> for Precision {
    fn from(digits: usize) -> Self {
        Self::new(digits)
    }
}

impl From<Precision> for usize {
    fn from(precision: Precision) -> Self {
        precision.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_is_enforced() {
        assert_eq!(Precision::new(0).digits(), MIN_DIGITS);
        assert_eq!(Precision::new(1).comparison_digits(), 1);
    }

    #[test]
    fn test_doubling_caps_at_ceiling() {
        let ceiling = Precision::new(50);
        let p = Precision::new(15).doubled(ceiling);
        assert_eq!(p.digits(), 30);
        assert_eq!(p.doubled(ceiling).digits(), 50);
        assert_eq!(ceiling.doubled(ceiling), ceiling);
    }

    #[test]
    fn test_doubling_never_lowers() {
        let p = Precision::new(60).doubled(Precision::new(50));
        assert_eq!(p.digits(), 60);
    }

    #[test]
    fn test_deserialize_enforces_minimum() {
        let p: Precision = serde_json::from_str("1").unwrap();
        assert_eq!(p.digits(), MIN_DIGITS);
        assert_eq!(p.comparison_digits(), 1);
        assert_eq!(serde_json::to_string(&Precision::new(20)).unwrap(), "20");
    }

    #[test]
    fn test_scale() {
        let base = Precision::new(15);
        assert_eq!(Precision::new(30).scale(base, 201), 402);
        assert_eq!(Precision::new(15).scale(base, 201), 201);
        assert_eq!(Precision::new(10).scale(base, 201), 201);
    }
}
