//! Property-based tests for the transforms.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use ramanujan_precision::Number;

    use crate::TransformId;

    const DIGITS: usize = 25;

    proptest! {
        #[test]
        fn transforms_are_deterministic(v in -1000i64..1000, id in 0u8..28) {
            let id = TransformId::from_type_id(id).unwrap();
            let x = Number::from_i64(v, DIGITS);
            prop_assert_eq!(id.apply(&x), id.apply(&x));
        }

        #[test]
        fn inverse_twice_is_identity(v in 1i64..10_000) {
            let x = Number::from_i64(v, DIGITS);
            let back = TransformId::Inverse.apply(&TransformId::Inverse.apply(&x));
            prop_assert_eq!(back.with_precision(DIGITS - 3), x);
        }

        #[test]
        fn powers_match_integer_arithmetic(v in -20i64..20, n in 2u32..8) {
            let id = TransformId::from_type_id(u8::try_from(n).unwrap()).unwrap();
            let x = Number::from_i64(v, DIGITS);
            prop_assert_eq!(id.apply(&x), Number::from_i64(v.pow(n), DIGITS));
        }

        #[test]
        fn sqrt_never_goes_complex_for_reals(v in -1000i64..1000) {
            let root = TransformId::Sqrt.apply(&Number::from_i64(v, DIGITS));
            prop_assert!(root.is_nan() == (v < 0));
            prop_assert!(root.is_nan() || root.as_real().is_some());
        }
    }
}
