//! Polynomial evaluation.
//!
//! A coefficient vector `(c0, c1, ..., cn)` is evaluated as
//! `c0 + c1*x + ... + cn*x^n` at a single point or at each point of an
//! ordered sequence. The shape of the point argument decides the shape of
//! the result.

use ramanujan_precision::{Number, Precision};

use crate::{AlgorithmError, AlgorithmId};

/// The `x` argument: one point, or an ordered sequence of points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XArg {
    /// Evaluate once.
    Scalar(Number),
    /// Evaluate at every point, in order.
    Sequence(Vec<Number>),
}

impl XArg {
    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Sequence(points) => points.len(),
        }
    }

    /// Returns true for an empty sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the integer points `start..end` at the given precision.
    #[must_use]
    pub fn range(start: i64, end: i64, precision: Precision) -> Self {
        let digits = precision.working_digits();
        Self::Sequence((start..end).map(|x| Number::from_i64(x, digits)).collect())
    }
}

/// Result of evaluating at an [`XArg`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XValue {
    /// The value at a scalar point.
    Single(Number),
    /// One value per point.
    PerPoint(Vec<Number>),
}

impl XValue {
    /// Flattens into an argument list for a collapse algorithm.
    #[must_use]
    pub fn into_vec(self) -> Vec<Number> {
        match self {
            Self::Single(value) => vec![value],
            Self::PerPoint(values) => values,
        }
    }
}

/// Evaluates integer coefficients at a point using Horner's rule.
#[must_use]
pub fn evaluate(coefficients: &[i64], x: &Number, precision: Precision) -> Number {
    let digits = precision.working_digits();
    let mut acc = Number::zero(digits);
    for &c in coefficients.iter().rev() {
        acc = &(&acc * x) + &Number::from_i64(c, digits);
    }
    acc
}

/// Evaluates arbitrary numeric coefficients at a point.
#[must_use]
pub fn evaluate_numbers(coefficients: &[Number], x: &Number, precision: Precision) -> Number {
    let mut acc = Number::zero(precision.working_digits());
    for c in coefficients.iter().rev() {
        acc = &(&acc * x) + c;
    }
    acc
}

/// Evaluates at a scalar point or at every point of a sequence.
#[must_use]
pub fn evaluate_at(coefficients: &[i64], x: &XArg, precision: Precision) -> XValue {
    match x {
        XArg::Scalar(point) => XValue::Single(evaluate(coefficients, point, precision)),
        XArg::Sequence(points) => XValue::PerPoint(
            points
                .iter()
                .map(|point| evaluate(coefficients, point, precision))
                .collect(),
        ),
    }
}

/// Registry adapter: `a` holds the coefficients and `b` the single point.
///
/// # Errors
///
/// Returns [`AlgorithmError::InvalidArity`] unless `b` has exactly one value.
pub fn polynomial(a: &[Number], b: &[Number], precision: Precision) -> Result<Number, AlgorithmError> {
    match b {
        [x] => Ok(evaluate_numbers(a, x, precision)),
        _ => Err(AlgorithmError::InvalidArity {
            algorithm: AlgorithmId::Polynomial,
            expected: 1,
            a: a.len(),
            b: b.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p() -> Precision {
        Precision::new(20)
    }

    fn int(n: i64) -> Number {
        Number::from_i64(n, p().working_digits())
    }

    #[test]
    fn test_evaluate() {
        // 1 + 2x + 3x^2 at x = 5
        assert_eq!(evaluate(&[1, 2, 3], &int(5), p()), int(86));
        assert_eq!(evaluate(&[], &int(5), p()), int(0));
        assert_eq!(evaluate(&[7], &int(5), p()), int(7));
    }

    #[test]
    fn test_sum_over_coefficient_cube() {
        // Every c0 in [-4, 4), c1 in [-3, 3), c2 in [-2, 2) at x = 7.
        let mut total = int(0);
        for c0 in -4..4 {
            for c1 in -3..3 {
                for c2 in -2..2 {
                    total = &total + &evaluate(&[c0, c1, c2], &int(7), p());
                }
            }
        }
        assert_eq!(total, int(-5472));
    }

    #[test]
    fn test_scalar_and_sequence_shapes() {
        let scalar = evaluate_at(&[0, 1], &XArg::Scalar(int(3)), p());
        assert_eq!(scalar, XValue::Single(int(3)));

        let sequence = evaluate_at(&[3, 1], &XArg::range(0, 4, p()), p());
        assert_eq!(sequence.into_vec(), vec![int(3), int(4), int(5), int(6)]);
    }

    #[test]
    fn test_registry_adapter_requires_one_point() {
        let coefficients = vec![int(1), int(1)];
        assert_eq!(polynomial(&coefficients, &[int(2)], p()).unwrap(), int(3));
        assert!(matches!(
            polynomial(&coefficients, &[int(2), int(3)], p()),
            Err(AlgorithmError::InvalidArity { .. })
        ));
    }
}
