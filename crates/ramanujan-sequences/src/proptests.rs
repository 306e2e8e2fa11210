//! Property-based tests for the generators.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{PairSpace, SequenceSpec};

    fn ranges() -> impl Strategy<Value = Vec<[i64; 2]>> {
        prop::collection::vec((-4i64..4, 1i64..4).prop_map(|(s, w)| [s, s + w]), 1..4)
    }

    proptest! {
        #[test]
        fn nth_matches_nested_loops(ranges in ranges()) {
            let spec = SequenceSpec::polynomial(&[ranges.as_slice()], None).unwrap();

            // Odometer with the last coefficient fastest.
            let mut current: Vec<i64> = ranges.iter().map(|r| r[0]).collect();
            let len = spec.len().unwrap();
            for index in 0..len {
                let element: Vec<i64> = spec.nth(index).unwrap().values().collect();
                prop_assert_eq!(&element, &current);
                for (slot, range) in current.iter_mut().zip(&ranges).rev() {
                    *slot += 1;
                    if *slot < range[1] {
                        break;
                    }
                    *slot = range[0];
                }
            }
        }

        #[test]
        fn len_is_product_of_widths(ranges in ranges()) {
            let spec = SequenceSpec::polynomial(&[ranges.as_slice()], None).unwrap();
            let expected: i64 = ranges.iter().map(|r| r[1] - r[0]).product();
            prop_assert_eq!(spec.len().unwrap(), expected as u64);
        }

        #[test]
        fn pair_index_is_stable(a in ranges(), b in ranges(), seed in any::<u64>()) {
            let space = PairSpace::new(
                SequenceSpec::polynomial(&[a.as_slice()], None).unwrap(),
                SequenceSpec::polynomial(&[b.as_slice()], None).unwrap(),
            );
            let index = seed % space.len().unwrap();
            let (ia, ib) = space.decode(index).unwrap();
            prop_assert_eq!(space.encode(ia, ib).unwrap(), index);
            let (ea, eb) = space.nth(index).unwrap();
            prop_assert_eq!(ea, space.a.nth(ia).unwrap());
            prop_assert_eq!(eb, space.b.nth(ib).unwrap());
        }

        #[test]
        fn digit_elements_have_fixed_length(
            repeat in 1u32..4,
            count in 0u32..5,
            prefix_repeat in 0u32..3,
            seed in any::<u64>(),
        ) {
            let spec = SequenceSpec::digits(vec![1, 2, 3], repeat, count, vec![4, 5], prefix_repeat).unwrap();
            let index = seed % spec.len().unwrap();
            let element = spec.nth(index).unwrap();
            prop_assert_eq!(element.values().count(), (prefix_repeat + repeat * count) as usize);
        }
    }
}
