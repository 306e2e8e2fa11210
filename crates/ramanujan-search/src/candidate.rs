//! Finding candidate pairs by bucket collision.
//!
//! Every LHS bucket is looked up on the RHS under the same key text. Within a
//! colliding pair of buckets, each (LHS, RHS) record pair whose absolute
//! values agree to the comparison precision and whose transforms pass
//! [`accepts_transforms`] becomes a [`Candidate`]. A record stored again
//! after an accuracy change sits in buckets of both accuracies, so pairs are
//! deduplicated across buckets.

use ramanujan_postproc::TransformId;
use ramanujan_precision::Precision;
use ramanujan_store::{Backend, BucketKey, BucketStore, ResultRecord, Side};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::SearchError;

/// A pair of records that collided in the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// The LHS bucket the pair was found in.
    pub key: BucketKey,
    /// The closed-form side.
    pub lhs: ResultRecord,
    /// The expansion side.
    pub rhs: ResultRecord,
}

impl Candidate {
    /// The lower of the two records' working precisions.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.lhs.precision.min(self.rhs.precision)
    }
}

/// Transform tie-break: both sides untransformed, or transformed differently.
///
/// Two sides carrying the same non-identity transform are rejected; they
/// would only restate a match between the untransformed values.
#[must_use]
pub fn accepts_transforms(lhs: TransformId, rhs: TransformId) -> bool {
    (lhs.is_identity() && rhs.is_identity()) || lhs != rhs
}

/// Returns true if the two records form a candidate.
#[must_use]
pub fn is_candidate(lhs: &ResultRecord, rhs: &ResultRecord) -> bool {
    let digits = lhs.precision.min(rhs.precision).comparison_digits();
    accepts_transforms(lhs.transform, rhs.transform) && lhs.value.agrees_with(&rhs.value, digits)
}

/// Pairs every colliding LHS and RHS record.
///
/// Each record pair is returned once, from the first bucket it was found in.
///
/// # Errors
///
/// Returns an error if the store cannot be scanned or read.
pub fn find_candidates<B: Backend>(store: &BucketStore<B>) -> Result<Vec<Candidate>, SearchError> {
    let mut candidates = Vec::new();
    let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
    let mut collisions = 0usize;
    let mut repeated = 0usize;

    for key in store.scan(Side::Lhs, None) {
        let key = key?;
        let rhs_records = store.get_key(&key.mirrored())?;
        if rhs_records.is_empty() {
            continue;
        }
        collisions += 1;
        let lhs_records = store.get_key(&key)?;
        for lhs in &lhs_records {
            for rhs in &rhs_records {
                if !is_candidate(lhs, rhs) {
                    continue;
                }
                if seen.insert((lhs.encode()?, rhs.encode()?)) {
                    candidates.push(Candidate {
                        key: key.clone(),
                        lhs: lhs.clone(),
                        rhs: rhs.clone(),
                    });
                } else {
                    repeated += 1;
                }
            }
        }
        debug!(key = %key, lhs = lhs_records.len(), rhs = rhs_records.len(), "bucket collision");
    }

    info!(collisions, repeated, candidates = candidates.len(), "candidate join finished");
    Ok(candidates)
}
