//! Continued fraction collapse.
//!
//! With `b` one shorter than `a` the collapse computes
//!
//! ```text
//! a[0] + b[0] / (a[1] + b[1] / (a[2] + ... + b[n-1] / a[n]))
//! ```
//!
//! If `b` is omitted every partial numerator is one. If `a` and `b` have the
//! same length and `b[0]` is zero, `b[0]` is dropped (it would wipe out the
//! whole tail); otherwise the innermost value is seeded with one.

use ramanujan_precision::{Number, Precision};

use crate::{AlgorithmError, AlgorithmId};

/// Collapses a continued fraction from the right.
///
/// The collapse halts at the first intermediate value that is exactly zero
/// and returns that partial value instead of dividing by it.
///
/// # Errors
///
/// Returns [`AlgorithmError::LengthMismatch`] unless `b` has the same length
/// as `a` or is one shorter.
pub fn continued_fraction(
    a: &[Number],
    b: Option<&[Number]>,
    precision: Precision,
) -> Result<Number, AlgorithmError> {
    let digits = precision.working_digits();
    let ones;
    let mut b = match b {
        Some(b) => b,
        None => {
            ones = vec![Number::from_i64(1, digits); a.len().saturating_sub(1)];
            &ones[..]
        }
    };
    let mut a = a;

    if a.len() == b.len() && b.first().is_some_and(Number::is_zero) {
        b = &b[1..];
    }

    let mut result = Number::from_i64(1, digits);
    if a.len() == b.len() + 1 {
        if let Some((last, rest)) = a.split_last() {
            result = last.clone();
            a = rest;
        }
    }

    if a.len() != b.len() {
        return Err(AlgorithmError::LengthMismatch {
            algorithm: AlgorithmId::ContinuedFraction,
            a: a.len(),
            b: b.len(),
        });
    }

    for (a_val, b_val) in a.iter().rev().zip(b.iter().rev()) {
        if result.is_zero() {
            break;
        }
        result = a_val + &(b_val / &result);
    }

    Ok(result)
}

/// Registry adapter; an empty `b` means "all partial numerators are one".
///
/// # Errors
///
/// See [`continued_fraction`].
pub fn continued_fraction_pair(
    a: &[Number],
    b: &[Number],
    precision: Precision,
) -> Result<Number, AlgorithmError> {
    if b.is_empty() && !a.is_empty() {
        continued_fraction(a, None, precision)
    } else {
        continued_fraction(a, Some(b), precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramanujan_precision::{Constant, Real};

    fn p() -> Precision {
        Precision::new(15)
    }

    fn ints(values: impl IntoIterator<Item = i64>) -> Vec<Number> {
        values
            .into_iter()
            .map(|v| Number::from_i64(v, p().working_digits()))
            .collect()
    }

    fn agrees(value: &Number, constant: Constant, digits: usize) -> bool {
        value.agrees_with(&constant.value(digits + 5), digits)
    }

    #[test]
    fn test_golden_ratio() {
        let value = continued_fraction(&ints(vec![1; 50]), None, p()).unwrap();
        assert!(agrees(&value, Constant::Phi, 15));
    }

    #[test]
    fn test_euler_number() {
        let a = ints(3..50);
        let b = ints((1..48).map(|k| -k));
        let value = continued_fraction(&a, Some(&b), p()).unwrap();
        // 3 - 1/(4 - 2/(5 - 3/(6 - ...))) = e
        assert!(agrees(&value, Constant::E, 15));
    }

    #[test]
    fn test_leading_zero_numerator_is_dropped() {
        // a = [3, 4, 5, ...], b = [0, -1, -2, ...] is the same fraction as above.
        let a = ints(3..50);
        let b = ints((0..47).map(|k| -k));
        let value = continued_fraction(&a, Some(&b), p()).unwrap();
        assert!(agrees(&value, Constant::E, 15));
    }

    #[test]
    fn test_equal_lengths_seed_with_one() {
        // 1 + 1/(2 + 3/1) = 1.2
        let value = continued_fraction(&ints([1, 2]), Some(&ints([1, 3])), p()).unwrap();
        assert_eq!(value, Number::Real(Real::parse("1.2", 25).unwrap()));
    }

    #[test]
    fn test_zero_intermediate_halts() {
        // Innermost: res = 0, so the collapse stops and returns zero.
        let value = continued_fraction(&ints([1, 2, 0]), Some(&ints([1, 1])), p()).unwrap();
        assert!(value.is_zero());

        // 2 + (-4)/2 = 0 after one step; the outer step is skipped.
        let value = continued_fraction(&ints([5, 2, 2]), Some(&ints([7, -4])), p()).unwrap();
        assert!(value.is_zero());
    }

    #[test]
    fn test_length_mismatch() {
        let err = continued_fraction(&ints([1, 2, 3]), Some(&ints([1])), p()).unwrap_err();
        assert_eq!(
            err,
            AlgorithmError::LengthMismatch {
                algorithm: AlgorithmId::ContinuedFraction,
                a: 3,
                b: 1,
            }
        );
        assert!(continued_fraction(&ints([1]), Some(&ints([1, 2, 3])), p()).is_err());
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(
            continued_fraction(&[], None, p()).unwrap(),
            Number::from_i64(1, p().working_digits())
        );
        assert_eq!(
            continued_fraction(&ints([7]), None, p()).unwrap(),
            Number::from_i64(7, p().working_digits())
        );
    }

    #[test]
    fn test_deterministic() {
        let a = ints(3..50);
        let b = ints((1..48).map(|k| -k));
        let first = continued_fraction(&a, Some(&b), p()).unwrap();
        let second = continued_fraction(&a, Some(&b), p()).unwrap();
        assert_eq!(first.to_decimal_string(15), second.to_decimal_string(15));
    }
}
