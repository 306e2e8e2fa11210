//! Property-based tests for partitioning.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::partition;

    proptest! {
        #[test]
        fn partition_is_contiguous(len in 0u64..10_000, size in 0u64..500) {
            let mut expected = 0;
            for (start, end) in partition(len, size) {
                prop_assert_eq!(start, expected);
                prop_assert!(end > start);
                prop_assert!(end - start <= size.max(1));
                expected = end;
            }
            prop_assert_eq!(expected, len);
        }

        #[test]
        fn partition_count(len in 0u64..10_000, size in 1u64..500) {
            prop_assert_eq!(partition(len, size).count() as u64, len.div_ceil(size));
        }
    }
}
