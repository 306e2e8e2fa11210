//! Cartesian pairing of two sequences.
//!
//! The pair at index `i` is `(a[i / |b|], b[i % |b|])`, so the `b` side
//! varies fastest. The index depends only on the two specs, never on how
//! the product was split into batches.

use ramanujan_precision::Precision;
use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::spec::SequenceSpec;
use crate::SequenceError;

/// The product of an `a` sequence and a `b` sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairSpace {
    /// Generator for the `a` arguments.
    pub a: SequenceSpec,
    /// Generator for the `b` arguments.
    pub b: SequenceSpec,
}

impl PairSpace {
    /// Pairs two generators.
    #[must_use]
    pub fn new(a: SequenceSpec, b: SequenceSpec) -> Self {
        Self { a, b }
    }

    /// Number of pairs.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::TooLarge`] if the count overflows.
    pub fn len(&self) -> Result<u64, SequenceError> {
        self.a
            .len()?
            .checked_mul(self.b.len()?)
            .ok_or(SequenceError::TooLarge)
    }

    /// Splits a pair index into the two element indices.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] past the end.
    pub fn decode(&self, index: u64) -> Result<(u64, u64), SequenceError> {
        let len = self.len()?;
        if index >= len {
            return Err(SequenceError::IndexOutOfBounds { index, len });
        }
        let len_b = self.b.len()?;
        Ok((index / len_b, index % len_b))
    }

    /// Combines two element indices into a pair index.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] if either index is past
    /// the end of its sequence.
    pub fn encode(&self, a_index: u64, b_index: u64) -> Result<u64, SequenceError> {
        let (len_a, len_b) = (self.a.len()?, self.b.len()?);
        if a_index >= len_a {
            return Err(SequenceError::IndexOutOfBounds { index: a_index, len: len_a });
        }
        if b_index >= len_b {
            return Err(SequenceError::IndexOutOfBounds { index: b_index, len: len_b });
        }
        Ok(a_index * len_b + b_index)
    }

    /// Regenerates the pair at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] past the end.
    pub fn nth(&self, index: u64) -> Result<(Element, Element), SequenceError> {
        let (ia, ib) = self.decode(index)?;
        Ok((self.a.nth(ia)?, self.b.nth(ib)?))
    }

    /// Returns a copy whose point ranges are lengthened for `precision`.
    ///
    /// The longer range grows from `n` to `n * precision / base` points and
    /// both ranges gain the same number of points, so the length difference between
    /// `a` and `b` arguments is kept. Coefficient ranges are untouched, so
    /// every pair index still decodes to the same elements.
    #[must_use]
    pub fn deepened(&self, precision: Precision, base: Precision) -> Self {
        let Some(len) = self.a.range_len().into_iter().chain(self.b.range_len()).max() else {
            return self.clone();
        };
        let extra = (precision.scale(base, len) - len).max(0);
        Self {
            a: self.a.extended(extra),
            b: self.b.extended(extra),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> PairSpace {
        PairSpace::new(
            SequenceSpec::polynomial(&[&[[0, 3]]], None).unwrap(),
            SequenceSpec::polynomial(&[&[[10, 12]]], None).unwrap(),
        )
    }

    #[test]
    fn test_b_varies_fastest() {
        let space = space();
        assert_eq!(space.len().unwrap(), 6);
        let pairs: Vec<(i64, i64)> = (0..6)
            .map(|i| {
                let (a, b) = space.nth(i).unwrap();
                let first = a.values().next().unwrap();
                let second = b.values().next().unwrap();
                (first, second)
            })
            .collect();
        assert_eq!(pairs, vec![(0, 10), (0, 11), (1, 10), (1, 11), (2, 10), (2, 11)]);
    }

    #[test]
    fn test_encode_inverts_decode() {
        let space = space();
        for i in 0..6 {
            let (a, b) = space.decode(i).unwrap();
            assert_eq!(space.encode(a, b).unwrap(), i);
        }
        assert!(space.decode(6).is_err());
        assert!(space.encode(3, 0).is_err());
        assert!(space.encode(0, 2).is_err());
    }

    #[test]
    fn test_deepening_keeps_staggered_lengths() {
        use crate::Points;

        let space = PairSpace::new(
            SequenceSpec::polynomial(&[&[[1, 2]]], Some(Points::Range { start: 0, end: 200 })).unwrap(),
            SequenceSpec::polynomial(&[&[[1, 2]]], Some(Points::Range { start: 0, end: 199 })).unwrap(),
        );
        let deep = space.deepened(Precision::new(30), Precision::new(15));
        assert_eq!(deep.a.range_end(), Some(400));
        assert_eq!(deep.b.range_end(), Some(399));
        assert_eq!(deep.len().unwrap(), space.len().unwrap());

        assert_eq!(space.deepened(Precision::new(15), Precision::new(15)), space);
        assert_eq!(self::space().deepened(Precision::new(30), Precision::new(15)), self::space());
    }

    #[test]
    fn test_deepening_negative_range_grows() {
        use crate::Points;

        let space = PairSpace::new(
            SequenceSpec::polynomial(&[&[[1, 2]]], Some(Points::Range { start: -60, end: -10 })).unwrap(),
            SequenceSpec::polynomial(&[&[[1, 2]]], Some(Points::Range { start: -60, end: -11 })).unwrap(),
        );
        let deep = space.deepened(Precision::new(30), Precision::new(15));
        assert_eq!(deep.a.range_len(), Some(100));
        assert_eq!(deep.b.range_len(), Some(99));
        assert_eq!(deep.a.range_end(), Some(40));
    }
}
