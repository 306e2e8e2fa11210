//! Bucket key derivation.
//!
//! A key is the absolute value rendered positionally, with the fractional
//! part truncated or zero-padded to exactly `accuracy` digits:
//!
//! ```text
//! -3.14159265358979 at accuracy 4  ->  3.1415
//! 111               at accuracy 3  ->  111.000
//! ```
//!
//! The same text is produced whether the value arrives as a [`Number`] or
//! as its decimal rendering, so keys derived during refinement line up with
//! keys written during generation.

use ramanujan_precision::Number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which family of expressions a result belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Closed forms built from constants.
    Lhs,
    /// Infinite expansions.
    Rhs,
}

impl Side {
    /// Both sides.
    pub const ALL: [Self; 2] = [Self::Lhs, Self::Rhs];

    /// The key namespace of this side.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Lhs => "lhs",
            Self::Rhs => "rhs",
        }
    }

    /// The opposite side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Lhs => Self::Rhs,
            Self::Rhs => Self::Lhs,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A bucket identifier: side plus truncated decimal text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    side: Side,
    text: String,
}

impl BucketKey {
    /// Derives the key of a numeric value; NaN and infinity have no key.
    #[must_use]
    pub fn from_number(side: Side, value: &Number, accuracy: usize) -> Option<Self> {
        match value.abs() {
            Number::Real(r) => Some(Self::from_decimal(side, &r.to_string(), accuracy)),
            _ => None,
        }
    }

    /// Derives the key of a pre-rendered decimal string.
    #[must_use]
    pub fn from_decimal(side: Side, decimal: &str, accuracy: usize) -> Self {
        Self {
            side,
            text: truncate_pad(decimal, accuracy),
        }
    }

    /// Rebuilds a key from its storage form, e.g. `lhs:2.7182`.
    #[must_use]
    pub fn parse(storage: &str) -> Option<Self> {
        let (prefix, text) = storage.split_once(':')?;
        let side = Side::ALL.into_iter().find(|s| s.prefix() == prefix)?;
        Some(Self {
            side,
            text: text.to_string(),
        })
    }

    /// The side this key belongs to.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The truncated decimal text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of fractional digits in the key.
    #[must_use]
    pub fn accuracy(&self) -> usize {
        self.text.split_once('.').map_or(0, |(_, frac)| frac.len())
    }

    /// The same bucket text on the other side.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            side: self.side.other(),
            text: self.text.clone(),
        }
    }

    /// The backend key, `side:text`.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{}:{}", self.side.prefix(), self.text)
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.side.prefix(), self.text)
    }
}

/// Drops the sign, then truncates or pads the fraction to `accuracy` digits.
#[must_use]
pub fn truncate_pad(decimal: &str, accuracy: usize) -> String {
    let unsigned = decimal.trim().trim_start_matches(['-', '+']);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let int = if int.is_empty() { "0" } else { int };

    let mut out = String::with_capacity(int.len() + 1 + accuracy);
    out.push_str(int);
    out.push('.');
    out.extend(frac.chars().take(accuracy));
    out.extend(std::iter::repeat('0').take(accuracy.saturating_sub(frac.len())));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramanujan_precision::{Complex, Constant, Real};

    fn real(text: &str) -> Number {
        Number::Real(Real::parse(text, 30).unwrap())
    }

    #[test]
    fn test_truncate_pad() {
        assert_eq!(truncate_pad("3.14159", 3), "3.141");
        assert_eq!(truncate_pad("-3.14159", 3), "3.141");
        assert_eq!(truncate_pad("111", 3), "111.000");
        assert_eq!(truncate_pad("0.5", 4), "0.5000");
        assert_eq!(truncate_pad(".5", 2), "0.50");
        assert_eq!(truncate_pad("12345.6", 0), "12345.");
    }

    #[test]
    fn test_integer_digits_are_kept_whole() {
        // Accuracy counts fractional digits only, so large values get keys
        // with more significant digits than small ones.
        let small = BucketKey::from_decimal(Side::Lhs, "1.23456789012345", 4);
        let large = BucketKey::from_decimal(Side::Lhs, "123456789.012345", 4);
        assert_eq!(small.text(), "1.2345");
        assert_eq!(large.text(), "123456789.0123");
    }

    #[test]
    fn test_numeric_and_text_paths_agree() {
        for text in ["2.718281828459045235360287", "-0.000123456789", "42", "1234.5"] {
            let value = real(text);
            for accuracy in [0, 1, 5, 10, 20] {
                let numeric = BucketKey::from_number(Side::Lhs, &value, accuracy).unwrap();
                let textual = BucketKey::from_decimal(Side::Lhs, &value.to_string(), accuracy);
                assert_eq!(numeric, textual, "{text} at {accuracy}");
            }
        }
    }

    #[test]
    fn test_sign_is_ignored() {
        let a = BucketKey::from_number(Side::Rhs, &real("1.5"), 3).unwrap();
        let b = BucketKey::from_number(Side::Rhs, &real("-1.5"), 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.storage_key(), "rhs:1.500");
    }

    #[test]
    fn test_complex_uses_modulus() {
        let digits = 30;
        let z = Number::complex(Complex::new(
            Real::from_i64(3, digits),
            Real::from_i64(-4, digits),
        ));
        let key = BucketKey::from_number(Side::Rhs, &z, 2).unwrap();
        assert_eq!(key.text(), "5.00");
    }

    #[test]
    fn test_undefined_values_have_no_key() {
        assert!(BucketKey::from_number(Side::Lhs, &Number::NaN, 5).is_none());
        assert!(BucketKey::from_number(Side::Lhs, &Number::Infinity, 5).is_none());
    }

    #[test]
    fn test_parse_roundtrip() {
        let key = BucketKey::from_number(Side::Lhs, &Constant::E.value(25), 10).unwrap();
        assert_eq!(key.storage_key(), "lhs:2.7182818284");
        assert_eq!(BucketKey::parse(&key.storage_key()), Some(key.clone()));
        assert_eq!(key.accuracy(), 10);
        assert_eq!(key.mirrored().storage_key(), "rhs:2.7182818284");
        assert_eq!(BucketKey::parse("config:accuracy"), None);
    }
}
