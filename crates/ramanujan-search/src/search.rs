//! The search phase: join, refine, record.

use ramanujan_store::{Backend, BucketStore, MatchRecord};
use tracing::info;

use crate::refine::{CandidateState, Refinement, Refiner};
use crate::{find_candidates, SearchError};

/// Outcome of one search over a store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// Pairs that collided and passed the comparison.
    pub candidates: usize,
    /// Pairs dropped by replay checks or refinement.
    pub rejected: usize,
    /// Confirmed matches, in candidate order.
    pub matches: Vec<MatchRecord>,
    /// Store keys the matches were written under.
    pub match_keys: Vec<String>,
}

impl SearchSummary {
    /// Number of confirmed matches.
    #[must_use]
    pub fn confirmed(&self) -> usize {
        self.matches.len()
    }
}

/// Finds, refines and records matches between the two sides of `store`.
///
/// # Errors
///
/// Returns an error if the store fails, or on a replay mismatch when the
/// refiner is strict.
pub fn search<B: Backend>(store: &BucketStore<B>, refiner: &Refiner) -> Result<SearchSummary, SearchError> {
    let candidates = find_candidates(store)?;
    let mut summary = SearchSummary {
        candidates: candidates.len(),
        ..SearchSummary::default()
    };

    for Refinement {
        candidate,
        state,
        precision,
    } in refiner.refine_all(candidates)?
    {
        if state != CandidateState::Confirmed {
            summary.rejected += 1;
            continue;
        }
        let record = MatchRecord::new(candidate.lhs, candidate.rhs, precision);
        summary.match_keys.push(store.put_match(&record)?);
        summary.matches.push(record);
    }

    info!(
        candidates = summary.candidates,
        rejected = summary.rejected,
        confirmed = summary.confirmed(),
        "search finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RefineConfig;
    use ramanujan_algorithms::AlgorithmId;
    use ramanujan_dispatch::{EvaluationBatch, Evaluator};
    use ramanujan_precision::{Constant, Precision};
    use ramanujan_sequences::{PairSpace, Points, SequenceSpec};
    use ramanujan_store::{MemoryBackend, RetryPolicy, Side};
    use std::sync::Arc;

    fn batch(side: Side, algorithm: AlgorithmId, space: PairSpace) -> EvaluationBatch {
        let end = space.len().unwrap();
        EvaluationBatch {
            side,
            algorithm,
            space,
            start: 0,
            end,
            precision: Precision::new(15),
            run_postproc: false,
            black_list: Vec::new(),
        }
    }

    #[test]
    fn test_phi_search_records_one_match() {
        let evaluator = Arc::new(Evaluator::standard());
        let store = BucketStore::open(Arc::new(MemoryBackend::new()), 10, RetryPolicy::immediate(1)).unwrap();

        // LHS: phi, 1 + phi, and 0 / 1 at phi.
        let lhs = PairSpace::new(
            SequenceSpec::polynomial(&[&[[0, 2], [0, 2]]], Some(Points::Constant(Constant::Phi))).unwrap(),
            SequenceSpec::polynomial(&[&[[1, 2]]], Some(Points::Constant(Constant::Phi))).unwrap(),
        );
        // RHS: continued fractions of all ones and of all twos.
        let rhs = PairSpace::new(
            SequenceSpec::polynomial(&[&[[1, 3]]], Some(Points::Range { start: 0, end: 200 })).unwrap(),
            SequenceSpec::polynomial(&[&[[1, 2]]], Some(Points::Range { start: 0, end: 199 })).unwrap(),
        );
        evaluator
            .run_batch(&batch(Side::Lhs, AlgorithmId::RationalFunction, lhs), &store)
            .unwrap();
        evaluator
            .run_batch(&batch(Side::Rhs, AlgorithmId::ContinuedFraction, rhs), &store)
            .unwrap();

        let refiner = Refiner::new(Arc::clone(&evaluator), RefineConfig::default(), false);
        let summary = search(&store, &refiner).unwrap();
        assert_eq!(summary.candidates, 1);
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.confirmed(), 1);
        assert_eq!(summary.matches[0].precision, Precision::new(50));
        assert_eq!(summary.matches[0].rhs.index, 0);

        let stored = store.matches().unwrap();
        assert_eq!(stored, summary.matches);
        assert!(summary.match_keys[0].starts_with("match:"));
    }

    #[test]
    fn test_accuracy_change_does_not_repeat_matches() {
        let evaluator = Arc::new(Evaluator::standard());
        let store = BucketStore::open(Arc::new(MemoryBackend::new()), 10, RetryPolicy::immediate(1)).unwrap();
        let lhs = PairSpace::new(
            SequenceSpec::polynomial(&[&[[0, 1], [1, 2]]], Some(Points::Constant(Constant::Phi))).unwrap(),
            SequenceSpec::polynomial(&[&[[1, 2]]], Some(Points::Constant(Constant::Phi))).unwrap(),
        );
        let rhs = PairSpace::new(
            SequenceSpec::polynomial(&[&[[1, 2]]], Some(Points::Range { start: 0, end: 200 })).unwrap(),
            SequenceSpec::polynomial(&[&[[1, 2]]], Some(Points::Range { start: 0, end: 199 })).unwrap(),
        );

        // Generate, raise the key accuracy, generate again.
        for accuracy in [10, 12] {
            store.set_accuracy(accuracy).unwrap();
            evaluator
                .run_batch(&batch(Side::Lhs, AlgorithmId::RationalFunction, lhs.clone()), &store)
                .unwrap();
            evaluator
                .run_batch(&batch(Side::Rhs, AlgorithmId::ContinuedFraction, rhs.clone()), &store)
                .unwrap();
        }
        assert_eq!(store.size(Side::Rhs).unwrap(), 2);

        let refiner = Refiner::new(Arc::clone(&evaluator), RefineConfig::default(), false);
        let summary = search(&store, &refiner).unwrap();
        assert_eq!(summary.candidates, 1);
        assert_eq!(summary.confirmed(), 1);
        assert_eq!(store.matches().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_store_finds_nothing() {
        let store = BucketStore::open(Arc::new(MemoryBackend::new()), 10, RetryPolicy::immediate(1)).unwrap();
        let refiner = Refiner::new(Arc::new(Evaluator::standard()), RefineConfig::default(), true);
        let summary = search(&store, &refiner).unwrap();
        assert_eq!(summary, SearchSummary::default());
    }
}
