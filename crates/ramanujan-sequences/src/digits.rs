//! Periodic digit-pattern sequences.
//!
//! Each element is a prefix drawn from one alphabet followed by a pattern
//! drawn from another, with the pattern repeated a fixed number of times.
//! These feed continued fractions with eventually periodic partial
//! denominators, such as `sqrt(3) = [1; 1, 2, 1, 2, ...]`.

use ramanujan_precision::{Number, Precision};
use serde::{Deserialize, Serialize};

use crate::element::{CoefficientVector, Element};
use crate::SequenceError;

/// A digit-pattern generator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitSequence {
    /// Alphabet for the repeated pattern.
    pub digits: Vec<i64>,
    /// Length of the pattern.
    pub digits_repeat: u32,
    /// Number of times the pattern is repeated.
    pub count: u32,
    /// Alphabet for the prefix.
    #[serde(default)]
    pub prefix_digits: Vec<i64>,
    /// Length of the prefix.
    #[serde(default)]
    pub prefix_repeat: u32,
}

impl DigitSequence {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns an error if an alphabet in use is empty or the sequence is
    /// too large to index.
    pub fn new(
        digits: Vec<i64>,
        digits_repeat: u32,
        count: u32,
        prefix_digits: Vec<i64>,
        prefix_repeat: u32,
    ) -> Result<Self, SequenceError> {
        let sequence = Self {
            digits,
            digits_repeat,
            count,
            prefix_digits,
            prefix_repeat,
        };
        sequence.validate()?;
        Ok(sequence)
    }

    /// Checks the alphabets and size.
    ///
    /// # Errors
    ///
    /// See [`DigitSequence::new`].
    pub fn validate(&self) -> Result<(), SequenceError> {
        if (self.digits_repeat > 0 && self.digits.is_empty())
            || (self.prefix_repeat > 0 && self.prefix_digits.is_empty())
        {
            return Err(SequenceError::EmptyAlphabet);
        }
        self.len().map(|_| ())
    }

    /// Number of `(prefix, pattern)` combinations.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::TooLarge`] if the count overflows.
    pub fn len(&self) -> Result<u64, SequenceError> {
        let prefixes = pow(self.prefix_digits.len(), self.prefix_repeat)?;
        let patterns = pow(self.digits.len(), self.digits_repeat)?;
        prefixes.checked_mul(patterns).ok_or(SequenceError::TooLarge)
    }

    /// Returns the element at `index`; the prefix varies slowest.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] past the end.
    pub fn nth(&self, index: u64) -> Result<Element, SequenceError> {
        let len = self.len()?;
        if index >= len {
            return Err(SequenceError::IndexOutOfBounds { index, len });
        }

        let patterns = pow(self.digits.len(), self.digits_repeat)?;
        let prefix = draw(&self.prefix_digits, self.prefix_repeat, index / patterns);
        let pattern = draw(&self.digits, self.digits_repeat, index % patterns);

        let mut values = CoefficientVector::with_capacity(
            prefix.len() + pattern.len() * self.count as usize,
        );
        values.extend(prefix);
        for _ in 0..self.count {
            values.extend_from_slice(&pattern);
        }
        Ok(Element::new([values]))
    }

    /// Turns an element into an argument list.
    #[must_use]
    pub fn evaluate(&self, element: &Element, precision: Precision) -> Vec<Number> {
        let digits = precision.working_digits();
        element.values().map(|v| Number::from_i64(v, digits)).collect()
    }
}

fn pow(base: usize, exp: u32) -> Result<u64, SequenceError> {
    u64::try_from(base)
        .ok()
        .and_then(|b| b.checked_pow(exp))
        .ok_or(SequenceError::TooLarge)
}

/// The `index`-th word of length `repeat` over `alphabet`, last position fastest.
fn draw(alphabet: &[i64], repeat: u32, mut index: u64) -> Vec<i64> {
    let radix = alphabet.len() as u64;
    let mut word = vec![0; repeat as usize];
    for slot in word.iter_mut().rev() {
        // radix > 0 whenever repeat > 0, checked by validate
        *slot = alphabet[(index % radix) as usize];
        index /= radix;
    }
    word
}
