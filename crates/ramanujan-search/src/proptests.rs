//! Property-based tests for the candidate tie-break and rendering.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use ramanujan_postproc::TransformId;

    use crate::render::continued_fraction_to_string;
    use crate::{accepts_transforms, polynomial_to_string};

    fn transform() -> impl Strategy<Value = TransformId> {
        prop::sample::select(TransformId::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn tie_break_is_symmetric(l in transform(), r in transform()) {
            prop_assert_eq!(accepts_transforms(l, r), accepts_transforms(r, l));
        }

        #[test]
        fn tie_break_rejects_only_equal_transforms(l in transform(), r in transform()) {
            let expected = l != r || l.is_identity();
            prop_assert_eq!(accepts_transforms(l, r), expected);
        }

        #[test]
        fn polynomial_rendering_names_nonzero_terms(coefficients in prop::collection::vec(-5i64..=5, 0..6)) {
            let text = polynomial_to_string(&coefficients, "x");
            let nonzero = coefficients.iter().filter(|&&c| c != 0).count();
            if nonzero == 0 {
                prop_assert_eq!(text, "0");
            } else {
                let joins = text.matches(" + ").count() + text.matches(" - ").count();
                prop_assert_eq!(joins, nonzero - 1);
            }
        }

        #[test]
        fn continued_fraction_parentheses_balance(len in 1usize..30, depth in 0usize..8) {
            let a: Vec<String> = (0..len).map(|i| (i + 1).to_string()).collect();
            let b: Vec<String> = (0..len - 1).map(|i| (i + 2).to_string()).collect();
            let text = continued_fraction_to_string(&a, &b, depth);
            prop_assert_eq!(text.matches('(').count(), text.matches(')').count());
            prop_assert!(text.starts_with('1'));
        }
    }
}
