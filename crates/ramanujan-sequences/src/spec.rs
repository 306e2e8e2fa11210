//! Serializable generator references.
//!
//! A [`SequenceSpec`] names a generator together with its arguments. Stored
//! results carry the spec and an index, which is enough to regenerate the
//! exact element that produced them.

use ramanujan_precision::{Constant, Number, Precision};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::digits::DigitSequence;
use crate::element::Element;
use crate::polynomial::{Points, PolynomialSequence};
use crate::SequenceError;

/// A generator and its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "generator", rename_all = "snake_case")]
pub enum SequenceSpec {
    /// Polynomial coefficients, optionally evaluated at points.
    Polynomial(PolynomialSequence),
    /// Repeated digit patterns.
    Digits(DigitSequence),
}

impl SequenceSpec {
    /// Shorthand for a polynomial generator.
    ///
    /// # Errors
    ///
    /// See [`PolynomialSequence::new`].
    pub fn polynomial(groups: &[&[[i64; 2]]], points: Option<Points>) -> Result<Self, SequenceError> {
        PolynomialSequence::new(groups, points).map(Self::Polynomial)
    }

    /// Shorthand for a digit generator.
    ///
    /// # Errors
    ///
    /// See [`DigitSequence::new`].
    pub fn digits(
        digits: Vec<i64>,
        digits_repeat: u32,
        count: u32,
        prefix_digits: Vec<i64>,
        prefix_repeat: u32,
    ) -> Result<Self, SequenceError> {
        DigitSequence::new(digits, digits_repeat, count, prefix_digits, prefix_repeat)
            .map(Self::Digits)
    }

    /// Returns the generator's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Polynomial(_) => "polynomial",
            Self::Digits(_) => "digits",
        }
    }

    /// Checks the arguments, as deserialized specs skip the constructors.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), SequenceError> {
        match self {
            Self::Polynomial(seq) => seq.validate(),
            Self::Digits(seq) => seq.validate(),
        }
    }

    /// Number of elements.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::TooLarge`] if the count overflows.
    pub fn len(&self) -> Result<u64, SequenceError> {
        match self {
            Self::Polynomial(seq) => seq.len(),
            Self::Digits(seq) => seq.len(),
        }
    }

    /// Returns the element at `index` without generating its predecessors.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] past the end.
    pub fn nth(&self, index: u64) -> Result<Element, SequenceError> {
        match self {
            Self::Polynomial(seq) => seq.nth(index),
            Self::Digits(seq) => seq.nth(index),
        }
    }

    /// Evaluates an element into an algorithm argument list.
    #[must_use]
    pub fn evaluate(&self, element: &Element, precision: Precision) -> Vec<Number> {
        match self {
            Self::Polynomial(seq) => seq.evaluate(element, precision),
            Self::Digits(seq) => seq.evaluate(element, precision),
        }
    }

    /// Iterates over every element in order.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::TooLarge`] if the sequence cannot be indexed.
    pub fn iter(&self) -> Result<impl Iterator<Item = Element> + '_, SequenceError> {
        let len = self.len()?;
        Ok((0..len).filter_map(move |i| self.nth(i).ok()))
    }

    /// True when the polynomial is evaluated at user-supplied points.
    #[must_use]
    pub fn has_points(&self) -> bool {
        matches!(self, Self::Polynomial(PolynomialSequence { points: Some(_), .. }))
    }

    /// Binds an unevaluated polynomial generator to a constant.
    ///
    /// Generators that already have points, and digit generators, are
    /// returned unchanged.
    #[must_use]
    pub fn bind_constant(&self, constant: Constant) -> Self {
        match self {
            Self::Polynomial(seq) if seq.points.is_none() => Self::Polynomial(seq.at_constant(constant)),
            _ => self.clone(),
        }
    }

    /// The end of the point range, if the generator evaluates at one.
    #[must_use]
    pub fn range_end(&self) -> Option<i64> {
        match self {
            Self::Polynomial(PolynomialSequence {
                points: Some(Points::Range { end, .. }),
                ..
            }) => Some(*end),
            _ => None,
        }
    }

    /// The number of points in the point range, if the generator evaluates
    /// at one.
    #[must_use]
    pub fn range_len(&self) -> Option<i64> {
        match self {
            Self::Polynomial(PolynomialSequence {
                points: Some(Points::Range { start, end }),
                ..
            }) => Some(end.saturating_sub(*start).max(0)),
            _ => None,
        }
    }

    /// Returns a copy whose point range has `extra` more points.
    #[must_use]
    pub fn extended(&self, extra: i64) -> Self {
        match self {
            Self::Polynomial(seq) => Self::Polynomial(PolynomialSequence {
                coefficients: seq.coefficients.clone(),
                points: seq.points.as_ref().map(|p| p.extended(extra)),
            }),
            Self::Digits(_) => self.clone(),
        }
    }
}

impl fmt::Display for SequenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polynomial(seq) => {
                let groups: Vec<String> = seq
                    .coefficients
                    .iter()
                    .map(|g| g.iter().map(ToString::to_string).collect::<Vec<_>>().join(" x "))
                    .collect();
                write!(f, "polynomial {}", groups.join(" | "))?;
                if let Some(points) = &seq.points {
                    write!(f, " at {points}")?;
                }
                Ok(())
            }
            Self::Digits(seq) => write!(
                f,
                "digits {:?}^{} x {} after {:?}^{}",
                seq.digits, seq.digits_repeat, seq.count, seq.prefix_digits, seq.prefix_repeat
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let spec = SequenceSpec::polynomial(
            &[&[[1, 4], [0, 2], [0, 1]]],
            Some(Points::Range { start: 0, end: 201 }),
        )
        .unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["generator"], "polynomial");
        assert_eq!(json["coefficients"], serde_json::json!([[[1, 4], [0, 2], [0, 1]]]));
        assert_eq!(json["points"]["range"]["end"], 201);

        let back: SequenceSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_digits_json_defaults() {
        let json = r#"{"generator": "digits", "digits": [1, 2], "digits_repeat": 2, "count": 3}"#;
        let spec: SequenceSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.len().unwrap(), 4);
        assert_eq!(spec.name(), "digits");
    }

    #[test]
    fn test_deserialized_spec_is_revalidated() {
        let json = r#"{"generator": "digits", "digits": [], "digits_repeat": 2, "count": 3}"#;
        let spec: SequenceSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.validate(), Err(SequenceError::EmptyAlphabet));
    }

    #[test]
    fn test_iter_matches_nth() {
        let spec = SequenceSpec::polynomial(&[&[[0, 2], [0, 3]]], None).unwrap();
        let elements: Vec<_> = spec.iter().unwrap().collect();
        assert_eq!(elements.len(), 6);
        for (i, element) in elements.iter().enumerate() {
            assert_eq!(&spec.nth(i as u64).unwrap(), element);
        }
    }

    #[test]
    fn test_bind_constant() {
        let raw = SequenceSpec::polynomial(&[&[[0, 2]]], None).unwrap();
        assert!(!raw.has_points());
        let bound = raw.bind_constant(Constant::Phi);
        assert!(bound.has_points());
        assert_eq!(bound.bind_constant(Constant::E), bound);

        let ranged = SequenceSpec::polynomial(&[&[[0, 2]]], Some(Points::Range { start: 0, end: 3 })).unwrap();
        assert_eq!(ranged.bind_constant(Constant::E), ranged);
    }

    #[test]
    fn test_display() {
        let spec = SequenceSpec::polynomial(&[&[[0, 2], [1, 3]]], Some(Points::Range { start: 0, end: 5 })).unwrap();
        assert_eq!(spec.to_string(), "polynomial [0, 2) x [1, 3) at x in [0, 5)");
    }
}
