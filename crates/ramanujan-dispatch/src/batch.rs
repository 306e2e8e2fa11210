//! Batch evaluation.
//!
//! A batch is a contiguous index range of one [`PairSpace`] evaluated with
//! one algorithm. Each pair is decoded from its global index, so a stored
//! record's `index` reproduces the pair regardless of how the space was
//! split into batches.

use ramanujan_algorithms::{AlgorithmId, AlgorithmRegistry};
use ramanujan_postproc::{TransformId, TransformRegistry};
use ramanujan_precision::{Number, Precision};
use ramanujan_sequences::{PairSpace, SequenceCache};
use ramanujan_store::{Backend, BucketStore, ResultRecord, SetOutcome, Side, SCHEMA_VERSION};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use std::sync::Arc;
use tracing::{debug, info};

use crate::queue::Task;
use crate::{DispatchError, EvaluationError};

/// A self-contained unit of generation work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationBatch {
    /// Which family the results belong to.
    pub side: Side,
    /// The algorithm applied to every pair.
    pub algorithm: AlgorithmId,
    /// The full pair space the indices refer to.
    pub space: PairSpace,
    /// First pair index, inclusive.
    pub start: u64,
    /// Last pair index, exclusive.
    pub end: u64,
    /// Working precision.
    pub precision: Precision,
    /// Whether every transform runs, or only the identity.
    pub run_postproc: bool,
    /// Integer results that are never stored.
    #[serde(default)]
    pub black_list: Vec<i64>,
}

impl EvaluationBatch {
    /// Number of pairs in the batch.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the batch covers no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counts gathered while running batches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Pairs evaluated.
    pub evaluated: u64,
    /// Pairs whose evaluation failed.
    pub skipped: u64,
    /// Transformed values that were NaN or infinite.
    pub undefined: u64,
    /// Values matching the black list.
    pub black_listed: u64,
    /// Records appended to a bucket.
    pub stored: u64,
    /// Records already present in their bucket.
    pub duplicates: u64,
}

impl AddAssign for BatchReport {
    fn add_assign(&mut self, other: Self) {
        self.evaluated += other.evaluated;
        self.skipped += other.skipped;
        self.undefined += other.undefined;
        self.black_listed += other.black_listed;
        self.stored += other.stored;
        self.duplicates += other.duplicates;
    }
}

/// Evaluates argument pairs with shared registries and a sequence cache.
pub struct Evaluator {
    algorithms: AlgorithmRegistry,
    transforms: TransformRegistry,
    cache: SequenceCache,
}

impl Evaluator {
    /// Creates an evaluator from explicit registries.
    #[must_use]
    pub fn new(algorithms: AlgorithmRegistry, transforms: TransformRegistry, cache: SequenceCache) -> Self {
        Self {
            algorithms,
            transforms,
            cache,
        }
    }

    /// An evaluator with every built-in algorithm and transform.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            AlgorithmRegistry::standard(),
            TransformRegistry::standard(),
            SequenceCache::new(),
        )
    }

    /// The transform registry.
    #[must_use]
    pub fn transforms(&self) -> &TransformRegistry {
        &self.transforms
    }

    /// The sequence cache.
    #[must_use]
    pub fn cache(&self) -> &SequenceCache {
        &self.cache
    }

    /// Evaluates the algorithm on the pair at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the algorithm
    /// rejects its arguments.
    pub fn evaluate_pair(
        &self,
        algorithm: AlgorithmId,
        space: &PairSpace,
        index: u64,
        precision: Precision,
    ) -> Result<Number, EvaluationError> {
        let (ia, ib) = space.decode(index)?;
        let a = self.cache.get_or_evaluate(&space.a, ia, precision)?;
        let b = self.cache.get_or_evaluate(&space.b, ib, precision)?;
        Ok(self.algorithms.apply(algorithm, &a, &b, precision)?)
    }

    /// Recomputes a stored value from its provenance.
    ///
    /// # Errors
    ///
    /// See [`Evaluator::evaluate_pair`]; also fails for unregistered
    /// transforms.
    pub fn replay(
        &self,
        algorithm: AlgorithmId,
        transform: TransformId,
        space: &PairSpace,
        index: u64,
        precision: Precision,
    ) -> Result<Number, EvaluationError> {
        let raw = self.evaluate_pair(algorithm, space, index, precision)?;
        Ok(self.transforms.apply(transform, &raw)?)
    }

    /// Recomputes a stored record's value at `precision`.
    ///
    /// # Errors
    ///
    /// See [`Evaluator::replay`].
    pub fn replay_record(&self, record: &ResultRecord, precision: Precision) -> Result<Number, EvaluationError> {
        self.replay(record.algorithm, record.transform, &record.space, record.index, precision)
    }

    /// Evaluates every pair of a batch and stores the surviving values.
    ///
    /// Failed pairs and undefined values are counted and skipped.
    ///
    /// # Errors
    ///
    /// Returns a store error; the batch stops at the first one.
    pub fn run_batch<B: Backend>(
        &self,
        batch: &EvaluationBatch,
        store: &BucketStore<B>,
    ) -> Result<BatchReport, DispatchError> {
        let mut report = BatchReport::default();
        let black_list: Vec<Number> = batch
            .black_list
            .iter()
            .map(|&n| Number::from_i64(n, batch.precision.working_digits()))
            .collect();

        for index in batch.start..batch.end {
            let raw = match self.evaluate_pair(batch.algorithm, &batch.space, index, batch.precision) {
                Ok(value) => value,
                Err(e) => {
                    debug!(index, error = %e, "skipping pair");
                    report.skipped += 1;
                    continue;
                }
            };
            report.evaluated += 1;

            let (a, b) = batch.space.nth(index)?;
            for (transform, value) in self.transforms.expand(&raw, batch.run_postproc) {
                if !value.is_finite() {
                    report.undefined += 1;
                    continue;
                }
                if black_list.contains(&value) {
                    report.black_listed += 1;
                    continue;
                }
                let record = ResultRecord {
                    schema: SCHEMA_VERSION,
                    side: batch.side,
                    algorithm: batch.algorithm,
                    transform,
                    precision: batch.precision,
                    value: value.clone(),
                    space: batch.space.clone(),
                    index,
                    a: a.clone(),
                    b: b.clone(),
                };
                match store.set(batch.side, &value, &record)? {
                    SetOutcome::Stored => report.stored += 1,
                    SetOutcome::Duplicate => report.duplicates += 1,
                    SetOutcome::Dropped => report.undefined += 1,
                }
            }
        }

        info!(
            side = %batch.side,
            algorithm = %batch.algorithm,
            start = batch.start,
            end = batch.end,
            stored = report.stored,
            skipped = report.skipped,
            "batch finished"
        );
        Ok(report)
    }
}

/// A batch bound to the evaluator and store that will run it.
pub struct StoreBatch<B: Backend + 'static> {
    /// The work.
    pub batch: EvaluationBatch,
    /// Shared evaluator.
    pub evaluator: Arc<Evaluator>,
    /// Shared destination store.
    pub store: Arc<BucketStore<B>>,
}

impl<B: Backend + 'static> Clone for StoreBatch<B> {
    fn clone(&self) -> Self {
        Self {
            batch: self.batch.clone(),
            evaluator: Arc::clone(&self.evaluator),
            store: Arc::clone(&self.store),
        }
    }
}

impl<B: Backend + 'static> Task for StoreBatch<B> {
    type Output = BatchReport;

    fn run(self) -> Result<BatchReport, String> {
        self.evaluator
            .run_batch(&self.batch, &self.store)
            .map_err(|e| e.to_string())
    }
}
