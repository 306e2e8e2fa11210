//! Splitting pair spaces into batches.

use ramanujan_algorithms::AlgorithmId;
use ramanujan_precision::Precision;
use ramanujan_sequences::{PairSpace, SequenceError};
use ramanujan_store::Side;

use crate::EvaluationBatch;

/// Splits `0..len` into consecutive `[start, end)` ranges of at most
/// `batch_size` indices.
pub fn partition(len: u64, batch_size: u64) -> impl Iterator<Item = (u64, u64)> {
    let size = batch_size.max(1);
    (0..len.div_ceil(size)).map(move |i| {
        let start = i * size;
        (start, (start + size).min(len))
    })
}

/// What one side of the search generates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidePlan {
    /// Which family the results belong to.
    pub side: Side,
    /// Algorithms applied to every pair space.
    pub algorithms: Vec<AlgorithmId>,
    /// Whether every transform runs.
    pub run_postproc: bool,
    /// Integer results that are never stored.
    pub black_list: Vec<i64>,
    /// The `(a, b)` generator products to evaluate.
    pub spaces: Vec<PairSpace>,
}

impl SidePlan {
    /// Total number of algorithm evaluations the plan performs.
    ///
    /// # Errors
    ///
    /// Returns an error if a space is invalid or the count overflows.
    pub fn evaluations(&self) -> Result<u64, SequenceError> {
        let mut total: u64 = 0;
        for space in &self.spaces {
            let per_algorithm = space.len()?;
            let count = per_algorithm
                .checked_mul(self.algorithms.len() as u64)
                .ok_or(SequenceError::TooLarge)?;
            total = total.checked_add(count).ok_or(SequenceError::TooLarge)?;
        }
        Ok(total)
    }
}

/// Forms every batch of a plan, space by space and algorithm by algorithm.
///
/// # Errors
///
/// Returns an error if a space is invalid or too large to index.
pub fn plan_batches(
    plan: &SidePlan,
    precision: Precision,
    batch_size: u64,
) -> Result<Vec<EvaluationBatch>, SequenceError> {
    let mut batches = Vec::new();
    for space in &plan.spaces {
        space.a.validate()?;
        space.b.validate()?;
        let len = space.len()?;
        for &algorithm in &plan.algorithms {
            batches.extend(partition(len, batch_size).map(|(start, end)| EvaluationBatch {
                side: plan.side,
                algorithm,
                space: space.clone(),
                start,
                end,
                precision,
                run_postproc: plan.run_postproc,
                black_list: plan.black_list.clone(),
            }));
        }
    }
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramanujan_sequences::SequenceSpec;

    #[test]
    fn test_partition_covers_range() {
        let ranges: Vec<_> = partition(10, 4).collect();
        assert_eq!(ranges, vec![(0, 4), (4, 8), (8, 10)]);
        assert_eq!(partition(0, 4).count(), 0);
        assert_eq!(partition(3, 0).collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_plan_batches() {
        let space = PairSpace::new(
            SequenceSpec::polynomial(&[&[[0, 5]]], None).unwrap(),
            SequenceSpec::polynomial(&[&[[1, 4]]], None).unwrap(),
        );
        let plan = SidePlan {
            side: Side::Lhs,
            algorithms: vec![AlgorithmId::RationalFunction, AlgorithmId::Polynomial],
            run_postproc: false,
            black_list: vec![],
            spaces: vec![space],
        };
        assert_eq!(plan.evaluations().unwrap(), 30);

        let batches = plan_batches(&plan, Precision::new(15), 10).unwrap();
        assert_eq!(batches.len(), 4);
        assert_eq!(batches[0].algorithm, AlgorithmId::RationalFunction);
        assert_eq!((batches[1].start, batches[1].end), (10, 15));
        assert_eq!(batches[2].algorithm, AlgorithmId::Polynomial);
        assert_eq!(batches.iter().map(EvaluationBatch::len).sum::<u64>(), 30);
    }
}
