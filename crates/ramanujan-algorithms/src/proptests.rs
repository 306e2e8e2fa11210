//! Property-based tests for the algorithms.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use ramanujan_precision::{Number, Precision};

    use crate::polynomial::{evaluate, XArg};
    use crate::{continued_fraction, AlgorithmError, AlgorithmId, AlgorithmRegistry};

    fn precision() -> Precision {
        Precision::new(20)
    }

    fn small_coefficients() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(-5i64..5i64, 1..4)
    }

    fn ints(values: &[i64]) -> Vec<Number> {
        values
            .iter()
            .map(|&v| Number::from_i64(v, precision().working_digits()))
            .collect()
    }

    proptest! {
        #[test]
        fn solve_is_deterministic(
            a in small_coefficients(),
            b in small_coefficients(),
            id in prop::sample::select(vec![AlgorithmId::ContinuedFraction, AlgorithmId::NestedRadical]),
        ) {
            let registry = AlgorithmRegistry::standard();
            let p = precision();
            let x = XArg::range(0, 30, p);
            let first = registry.solve(id, &a, &b, &x, p);
            let second = registry.solve(id, &a, &b, &x, p);
            match (first, second) {
                (Ok(first), Ok(second)) => {
                    prop_assert_eq!(first.to_decimal_string(p.digits()), second.to_decimal_string(p.digits()));
                }
                (first, second) => prop_assert_eq!(first.is_err(), second.is_err()),
            }
        }

        #[test]
        fn polynomial_matches_integer_arithmetic(coefficients in small_coefficients(), x in -20i64..20i64) {
            let expected = coefficients
                .iter()
                .rev()
                .fold(0i64, |acc, &c| acc * x + c);
            let value = evaluate(&coefficients, &Number::from_i64(x, 30), precision());
            prop_assert_eq!(value, Number::from_i64(expected, 30));
        }

        #[test]
        fn continued_fraction_length_contract(a_len in 0usize..6, b_len in 0usize..6) {
            let a = ints(&vec![2; a_len]);
            let b = ints(&vec![1; b_len]);
            let result = continued_fraction(&a, Some(&b), precision());
            let valid = b_len == a_len || b_len + 1 == a_len;
            if valid {
                prop_assert!(result.is_ok());
            } else {
                let is_mismatch = matches!(result, Err(AlgorithmError::LengthMismatch { .. }));
                prop_assert!(is_mismatch);
            }
        }

        #[test]
        fn continued_fraction_never_divides_by_zero(a in prop::collection::vec(-3i64..3i64, 1..8)) {
            let b = vec![1; a.len() - 1];
            let value = continued_fraction(&ints(&a), Some(&ints(&b)), precision()).unwrap();
            prop_assert!(!value.is_nan());
        }
    }
}
