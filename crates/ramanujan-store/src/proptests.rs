//! Property-based tests for key derivation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use ramanujan_precision::{Number, Real};

    use crate::{BucketKey, Side};

    fn decimal() -> impl Strategy<Value = (u32, String)> {
        (0u32..1000, "[0-9]{1,30}")
    }

    fn value(int: u32, frac: &str) -> Number {
        Number::Real(Real::parse(&format!("{int}.{frac}"), 40).unwrap())
    }

    proptest! {
        #[test]
        fn numeric_and_text_keys_agree((int, frac) in decimal(), accuracy in 0usize..35) {
            let v = value(int, &frac);
            let numeric = BucketKey::from_number(Side::Lhs, &v, accuracy).unwrap();
            let text = BucketKey::from_decimal(Side::Lhs, &v.to_string(), accuracy);
            prop_assert_eq!(numeric, text);
        }

        #[test]
        fn keys_are_prefix_closed((int, frac) in decimal(), accuracy in 0usize..34) {
            let v = value(int, &frac);
            let short = BucketKey::from_number(Side::Rhs, &v, accuracy).unwrap();
            let long = BucketKey::from_number(Side::Rhs, &v, accuracy + 1).unwrap();
            prop_assert!(long.text().starts_with(short.text()));
            prop_assert_eq!(long.accuracy(), accuracy + 1);
        }

        #[test]
        fn more_accuracy_separates_different_values(
            (int, frac) in decimal(),
            (_, other) in decimal(),
        ) {
            let a = value(int, &frac);
            let b = value(int, &other);
            prop_assume!(a != b);
            let accuracy = frac.len().max(other.len());
            let ka = BucketKey::from_number(Side::Lhs, &a, accuracy).unwrap();
            let kb = BucketKey::from_number(Side::Lhs, &b, accuracy).unwrap();
            prop_assert_ne!(ka, kb);
        }

        #[test]
        fn sign_never_matters((int, frac) in decimal(), accuracy in 0usize..35) {
            let v = value(int, &frac);
            let negated = -&v;
            prop_assert_eq!(
                BucketKey::from_number(Side::Lhs, &v, accuracy),
                BucketKey::from_number(Side::Lhs, &negated, accuracy)
            );
        }
    }
}
