//! Rational function formation.

use ramanujan_precision::{Number, Precision};

use crate::{AlgorithmError, AlgorithmId};

/// Returns `a[0] / b[0]`, or [`Number::NaN`] when `b[0]` is zero.
///
/// # Errors
///
/// Returns [`AlgorithmError::InvalidArity`] unless both lists hold exactly
/// one value.
pub fn rational_function(a: &[Number], b: &[Number], _precision: Precision) -> Result<Number, AlgorithmError> {
    match (a, b) {
        ([numerator], [denominator]) => Ok(numerator / denominator),
        _ => Err(AlgorithmError::InvalidArity {
            algorithm: AlgorithmId::RationalFunction,
            expected: 1,
            a: a.len(),
            b: b.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: i64) -> Number {
        Number::from_i64(n, 25)
    }

    #[test]
    fn test_quotient() {
        let p = Precision::new(15);
        assert_eq!(rational_function(&[num(3)], &[num(4)], p).unwrap().to_string(), "0.75");
    }

    #[test]
    fn test_zero_denominator_is_nan() {
        let p = Precision::new(15);
        assert!(rational_function(&[num(3)], &[num(0)], p).unwrap().is_nan());
    }

    #[test]
    fn test_invalid_arity() {
        let p = Precision::new(15);
        let err = rational_function(&[num(1), num(2)], &[num(1)], p).unwrap_err();
        assert_eq!(
            err,
            AlgorithmError::InvalidArity {
                algorithm: AlgorithmId::RationalFunction,
                expected: 1,
                a: 2,
                b: 1,
            }
        );
    }
}
