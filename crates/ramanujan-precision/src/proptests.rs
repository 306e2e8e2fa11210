//! Property-based tests for decimal arithmetic.

#[cfg(test)]
mod tests {
    use dashu::integer::IBig;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    use crate::real::digit_count;
    use crate::{Number, Real};

    const DIGITS: usize = 40;

    fn significand() -> impl Strategy<Value = i64> {
        prop_oneof![-1_000_000_000i64..1_000_000_000i64, any::<i64>()]
    }

    fn exponent() -> impl Strategy<Value = i64> {
        -10i64..10i64
    }

    fn real(sig: i64, exp: i64) -> Real {
        Real::from_parts(IBig::from(sig), exp, DIGITS)
    }

    fn positive_real() -> impl Strategy<Value = Real> {
        (1i64..1_000_000_000i64, exponent()).prop_map(|(s, e)| real(s, e))
    }

    /// True if `a` and `b` differ by at most `10^-digits` relative to `b`.
    fn close(a: &Real, b: &Real, digits: usize) -> bool {
        let diff = a - b;
        diff.is_zero() || diff.magnitude() <= b.magnitude() - digits as i64
    }

    proptest! {
        #[test]
        fn render_parse_roundtrip(s in significand(), e in exponent()) {
            let x = real(s, e);
            let back = Real::parse(&x.render_exact(), DIGITS).unwrap();
            prop_assert_eq!(back, x);
        }

        #[test]
        fn add_commutative(a in significand(), ea in exponent(), b in significand(), eb in exponent()) {
            let a = real(a, ea);
            let b = real(b, eb);
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn mul_commutative(a in significand(), ea in exponent(), b in significand(), eb in exponent()) {
            let a = real(a, ea);
            let b = real(b, eb);
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn ordering_matches_difference(a in significand(), ea in exponent(), b in significand(), eb in exponent()) {
            let a = real(a, ea);
            let b = real(b, eb);
            let expected = (&a - &b).signum().cmp(&0);
            prop_assert_eq!(a.cmp(&b), expected);
        }

        #[test]
        fn digit_count_matches_rendering(s in any::<i64>()) {
            let n = IBig::from(s);
            let rendered = s.unsigned_abs().to_string();
            prop_assert_eq!(digit_count(&n), rendered.len());
        }

        #[test]
        fn sqrt_squares_back(x in positive_real()) {
            let root = x.sqrt().unwrap();
            prop_assert!(close(&(&root * &root), &x, DIGITS - 2));
        }

        #[test]
        fn division_inverts_multiplication(x in positive_real(), y in positive_real()) {
            let product = &x * &y;
            let back = product.checked_div(&y).unwrap();
            prop_assert!(close(&back, &x, DIGITS - 2));
        }

        #[test]
        fn exp_inverts_ln(x in positive_real()) {
            let back = x.ln().unwrap().exp().unwrap();
            prop_assert!(close(&back, &x, DIGITS - 4));
        }

        #[test]
        fn truncated_agreement_is_monotone(x in positive_real(), digits in 1usize..30) {
            let y = x.with_precision(digits + 5);
            if x.agrees_with(&y, digits + 1) {
                prop_assert!(x.agrees_with(&y, digits));
            }
        }

        #[test]
        fn division_by_zero_is_nan(s in significand(), e in exponent()) {
            let x = Number::Real(real(s, e));
            let zero = Number::zero(DIGITS);
            prop_assert!((&x / &zero).is_nan());
            prop_assert_eq!(zero.recip().is_infinite(), true);
        }
    }

    #[test]
    fn ordering_is_total_on_equal_values() {
        assert_eq!(real(150, -2).cmp(&real(15, -1)), Ordering::Equal);
    }
}
