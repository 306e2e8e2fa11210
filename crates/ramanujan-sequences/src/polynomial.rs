//! Polynomial coefficient sequences.
//!
//! Every coefficient has its own `[start, end)` range, and coefficients are
//! organised into groups. The sequence is the Cartesian product of all
//! ranges, with the last coefficient of the last group varying fastest.

use ramanujan_algorithms::polynomial::{evaluate_at, XArg};
use ramanujan_precision::{Constant, Number, Precision};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::element::{CoefficientVector, Element};
use crate::range::CoefficientRange;
use crate::SequenceError;

/// Where the generated polynomials are evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Points {
    /// At every integer in `start..end`, giving one value per point.
    Range {
        /// First point.
        start: i64,
        /// One past the last point.
        end: i64,
    },
    /// At a single named constant.
    Constant(Constant),
}

impl Points {
    /// Builds the `x` argument for polynomial evaluation.
    #[must_use]
    pub fn to_xarg(&self, precision: Precision) -> XArg {
        match self {
            Self::Range { start, end } => XArg::range(*start, *end, precision),
            Self::Constant(c) => XArg::Scalar(c.value(precision.working_digits())),
        }
    }

    /// Returns a copy with `extra` more points at the end of a range.
    #[must_use]
    pub fn extended(&self, extra: i64) -> Self {
        match self {
            Self::Range { start, end } => Self::Range {
                start: *start,
                end: end.saturating_add(extra),
            },
            Self::Constant(_) => self.clone(),
        }
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { start, end } => write!(f, "x in [{start}, {end})"),
            Self::Constant(c) => write!(f, "x = {c}"),
        }
    }
}

/// A polynomial sequence generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolynomialSequence {
    /// Coefficient ranges, one list per group.
    pub coefficients: Vec<Vec<CoefficientRange>>,
    /// Evaluation points; `None` emits the raw coefficients.
    #[serde(default)]
    pub points: Option<Points>,
}

impl PolynomialSequence {
    /// Creates a generator from `[start, end)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if any range is empty or no group is given.
    pub fn new(groups: &[&[[i64; 2]]], points: Option<Points>) -> Result<Self, SequenceError> {
        let coefficients = groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|&[start, end]| CoefficientRange::new(start, end))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let sequence = Self { coefficients, points };
        sequence.validate()?;
        Ok(sequence)
    }

    /// Checks that the generator is non-empty and indexable.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty group list or an unindexable size.
    pub fn validate(&self) -> Result<(), SequenceError> {
        if self.coefficients.is_empty() {
            return Err(SequenceError::NoCoefficients);
        }
        self.len().map(|_| ())
    }

    /// Number of coefficient combinations.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::TooLarge`] if the count overflows.
    pub fn len(&self) -> Result<u64, SequenceError> {
        self.coefficients
            .iter()
            .flatten()
            .try_fold(1u64, |acc, range| acc.checked_mul(range.len()))
            .ok_or(SequenceError::TooLarge)
    }

    /// Returns the coefficient combination at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] past the end.
    pub fn nth(&self, index: u64) -> Result<Element, SequenceError> {
        let len = self.len()?;
        if index >= len {
            return Err(SequenceError::IndexOutOfBounds { index, len });
        }

        // Decode the mixed-radix index from the last coefficient backwards.
        let mut remaining = index;
        let mut groups: Vec<CoefficientVector> = self
            .coefficients
            .iter()
            .map(|group| CoefficientVector::from_elem(0, group.len()))
            .collect();
        for (group, ranges) in groups.iter_mut().zip(&self.coefficients).rev() {
            for (slot, range) in group.iter_mut().zip(ranges).rev() {
                *slot = range.nth(remaining % range.len());
                remaining /= range.len();
            }
        }

        Ok(Element::new(groups))
    }

    /// Evaluates an element into an argument list.
    ///
    /// Without points the coefficients themselves are the arguments. With
    /// points, each group is evaluated at every point and the results are
    /// concatenated group after group.
    #[must_use]
    pub fn evaluate(&self, element: &Element, precision: Precision) -> Vec<Number> {
        let digits = precision.working_digits();
        let Some(points) = &self.points else {
            return element.values().map(|c| Number::from_i64(c, digits)).collect();
        };

        let x = points.to_xarg(precision);
        element
            .groups()
            .iter()
            .flat_map(|group| evaluate_at(group, &x, precision).into_vec())
            .collect()
    }

    /// Returns a copy evaluated at a named constant.
    #[must_use]
    pub fn at_constant(&self, constant: Constant) -> Self {
        Self {
            coefficients: self.coefficients.clone(),
            points: Some(Points::Constant(constant)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn p() -> Precision {
        Precision::new(15)
    }

    #[test]
    fn test_enumeration_order() {
        let seq = PolynomialSequence::new(&[&[[0, 2], [5, 7]]], None).unwrap();
        assert_eq!(seq.len().unwrap(), 4);
        let all: Vec<_> = (0..4).map(|i| seq.nth(i).unwrap().values().collect::<Vec<_>>()).collect();
        assert_eq!(all, vec![vec![0, 5], vec![0, 6], vec![1, 5], vec![1, 6]]);
    }

    #[test]
    fn test_groups_vary_last_fastest() {
        let seq = PolynomialSequence::new(&[&[[0, 2]], &[[0, 3]]], None).unwrap();
        assert_eq!(seq.len().unwrap(), 6);
        let element = seq.nth(4).unwrap();
        assert_eq!(element, Element::new([smallvec![1], smallvec![1]]));
    }

    #[test]
    fn test_out_of_bounds() {
        let seq = PolynomialSequence::new(&[&[[0, 2]]], None).unwrap();
        assert_eq!(
            seq.nth(2),
            Err(SequenceError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(PolynomialSequence::new(&[&[[1, 1]]], None).is_err());
        assert_eq!(PolynomialSequence::new(&[], None), Err(SequenceError::NoCoefficients));
    }

    #[test]
    fn test_evaluate_over_range() {
        let seq = PolynomialSequence::new(
            &[&[[3, 4], [1, 2], [0, 1]]],
            Some(Points::Range { start: 0, end: 4 }),
        )
        .unwrap();
        let values = seq.evaluate(&seq.nth(0).unwrap(), p());
        let digits = p().working_digits();
        let expected: Vec<_> = (3..7).map(|v| Number::from_i64(v, digits)).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_evaluate_at_constant() {
        let seq = PolynomialSequence::new(&[&[[0, 1], [1, 2], [0, 1]]], None)
            .unwrap()
            .at_constant(Constant::E);
        let values = seq.evaluate(&seq.nth(0).unwrap(), p());
        assert_eq!(values.len(), 1);
        assert!(values[0].agrees_with(&Constant::E.value(25), 20));
    }

    #[test]
    fn test_raw_coefficients_without_points() {
        let seq = PolynomialSequence::new(&[&[[2, 3], [-1, 0]]], None).unwrap();
        let values = seq.evaluate(&seq.nth(0).unwrap(), p());
        let digits = p().working_digits();
        assert_eq!(values, vec![Number::from_i64(2, digits), Number::from_i64(-1, digits)]);
    }

    #[test]
    fn test_extended_points() {
        let points = Points::Range { start: 0, end: 201 };
        assert_eq!(points.extended(201), Points::Range { start: 0, end: 402 });
        let constant = Points::Constant(Constant::E);
        assert_eq!(constant.extended(10), constant);
    }
}
