//! Named constants used as evaluation points.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::elementary;
use crate::number::Number;
use crate::precision::GUARD_DIGITS;
use crate::real::Real;
use crate::PrecisionError;

/// A constant that can be evaluated to any precision.
///
/// Constants serialize as their symbol (`"e"`, `"sqrt(2)"`, `"-3"`), so
/// configuration files and provenance records stay readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Constant {
    /// Euler's number.
    E,
    /// The circle constant.
    Pi,
    /// The golden ratio `(1 + sqrt 5) / 2`.
    Phi,
    /// The square root of an integer.
    Sqrt(u32),
    /// The natural logarithm of an integer.
    Ln(u32),
    /// An integer.
    Integer(i64),
}

impl Constant {
    /// Evaluates the constant to `digits` significant digits.
    #[must_use]
    pub fn value(&self, digits: usize) -> Number {
        let wp = digits + GUARD_DIGITS;
        match *self {
            Self::E => Number::Real(elementary::e(digits)),
            Self::Pi => Number::Real(elementary::pi(digits)),
            Self::Phi => {
                let root5 = Real::from_i64(5, wp).sqrt_abs();
                let phi = (&Real::one(wp) + &root5).div_int(2);
                Number::Real(phi.with_precision(digits))
            }
            Self::Sqrt(n) => {
                let root = Real::from_i64(i64::from(n), wp).sqrt_abs();
                Number::Real(root.with_precision(digits))
            }
            Self::Ln(n) => Number::from_i64(i64::from(n), digits).ln(),
            Self::Integer(n) => Number::from_i64(n, digits),
        }
    }

    /// Returns the symbol used in rendered closed forms.
    #[must_use]
    pub fn symbol(&self) -> String {
        match self {
            Self::E => "e".to_string(),
            Self::Pi => "pi".to_string(),
            Self::Phi => "phi".to_string(),
            Self::Sqrt(n) => format!("sqrt({n})"),
            Self::Ln(n) => format!("ln({n})"),
            Self::Integer(n) => n.to_string(),
        }
    }
}

fn parse_argument(text: &str, prefix: &str) -> Option<u32> {
    text.strip_prefix(prefix)?.strip_suffix(')')?.trim().parse().ok()
}

impl FromStr for Constant {
    type Err = PrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        match text {
            "e" => return Ok(Self::E),
            "pi" => return Ok(Self::Pi),
            "phi" => return Ok(Self::Phi),
            _ => {}
        }

        if let Some(n) = parse_argument(text, "sqrt(") {
            return Ok(Self::Sqrt(n));
        }
        if let Some(n) = parse_argument(text, "ln(") {
            if n == 0 {
                return Err(PrecisionError::UnknownConstant(text.to_string()));
            }
            return Ok(Self::Ln(n));
        }

        text.parse()
            .map(Self::Integer)
            .map_err(|_| PrecisionError::UnknownConstant(text.to_string()))
    }
}

impl TryFrom<String> for Constant {
    type Error = PrecisionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Constant> for String {
    fn from(value: Constant) -> Self {
        value.symbol()
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols() {
        assert_eq!("e".parse::<Constant>().unwrap(), Constant::E);
        assert_eq!("sqrt(3)".parse::<Constant>().unwrap(), Constant::Sqrt(3));
        assert_eq!(" ln(2) ".parse::<Constant>().unwrap(), Constant::Ln(2));
        assert_eq!("-7".parse::<Constant>().unwrap(), Constant::Integer(-7));
        assert!("gamma".parse::<Constant>().is_err());
        assert!("ln(0)".parse::<Constant>().is_err());
    }

    #[test]
    fn test_values() {
        assert_eq!(Constant::Phi.value(20).to_string(), "1.6180339887498948482");
        assert_eq!(Constant::Sqrt(2).value(15).to_string(), "1.4142135623731");
        assert_eq!(Constant::Integer(12).value(15).to_string(), "12");
        assert_eq!(Constant::E.value(10).to_string(), "2.718281828");
    }

    #[test]
    fn test_serde_uses_symbol() {
        let json = serde_json::to_string(&vec![Constant::E, Constant::Sqrt(5)]).unwrap();
        assert_eq!(json, r#"["e","sqrt(5)"]"#);
        let back: Vec<Constant> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Constant::E, Constant::Sqrt(5)]);
    }
}
