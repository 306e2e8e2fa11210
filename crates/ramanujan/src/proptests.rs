//! Property-based tests for side planning.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use ramanujan_precision::Constant;
    use ramanujan_sequences::{Points, SequenceSpec};
    use ramanujan_store::Side;

    use crate::SideConfig;

    fn constants() -> impl Strategy<Value = Vec<Constant>> {
        prop::sample::subsequence(vec![Constant::E, Constant::Pi, Constant::Phi, Constant::Sqrt(2)], 0..=4)
    }

    fn spec(ranged: bool, width: i64) -> SequenceSpec {
        let points = ranged.then_some(Points::Range { start: 0, end: 10 });
        SequenceSpec::polynomial(&[&[[0, width]]], points).unwrap()
    }

    proptest! {
        #[test]
        fn unbound_pairs_expand_per_constant(
            constants in constants(),
            a_ranged in any::<bool>(),
            b_ranged in any::<bool>(),
            widths in prop::collection::vec(1i64..5, 1..4),
        ) {
            let side = SideConfig {
                a_sequences: widths.iter().map(|&w| spec(a_ranged, w)).collect(),
                b_sequences: vec![spec(b_ranged, 2)],
                ..SideConfig::default()
            };
            let plan = side.plan(Side::Lhs, &constants);
            let mut distinct = widths.clone();
            distinct.sort_unstable();
            distinct.dedup();

            let per_pair = if (a_ranged && b_ranged) || constants.is_empty() { 1 } else { constants.len() };
            prop_assert_eq!(plan.spaces.len(), distinct.len() * per_pair);
            for space in &plan.spaces {
                prop_assert!(constants.is_empty() || (space.a.has_points() && space.b.has_points()));
            }
        }
    }
}
