//! Precision refinement of candidate pairs.
//!
//! Each candidate moves through
//!
//! ```text
//! Unseen -> Candidate -> Refined -> ... -> Confirmed
//!                   \          \
//!                    Rejected   Rejected
//! ```
//!
//! A pair first has both records replayed at their stored precision; a
//! record that does not reproduce its stored value is a replay mismatch.
//! Surviving pairs are then replayed at doubling precisions up to the
//! ceiling. A pair that disagrees at any round is rejected for good.

use ramanujan_dispatch::Evaluator;
use ramanujan_precision::{Number, Precision};
use ramanujan_store::ResultRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{Candidate, SearchError};

/// Where a pair stands in refinement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandidateState {
    /// Not yet checked.
    Unseen,
    /// Collided in the store and replays soundly.
    Candidate,
    /// Still agreeing after at least one precision doubling.
    Refined,
    /// Disagreed, or failed to replay. Never reconsidered.
    Rejected,
    /// Agreed at the precision ceiling.
    Confirmed,
}

impl CandidateState {
    /// True while the pair is still being refined.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Unseen | Self::Candidate | Self::Refined)
    }
}

/// What to do when a stored record does not replay to its value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayCheck {
    /// Abort the search with [`SearchError::ReplayMismatch`].
    Strict,
    /// Log the mismatch and reject the pair.
    #[default]
    Lenient,
}

/// Refinement settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Precision the first doubling starts from.
    pub base: Precision,
    /// Precision at which agreeing pairs are confirmed.
    pub ceiling: Precision,
    /// Scale point ranges with precision while replaying.
    pub deepen: bool,
    /// Handling of replay mismatches.
    pub replay_check: ReplayCheck,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            base: Precision::DEFAULT,
            ceiling: Precision::new(50),
            deepen: false,
            replay_check: ReplayCheck::Lenient,
        }
    }
}

/// A candidate and its progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Refinement {
    /// The pair.
    pub candidate: Candidate,
    /// Current state.
    pub state: CandidateState,
    /// Highest precision at which the pair agreed.
    pub precision: Precision,
}

impl Refinement {
    /// Starts tracking a candidate.
    #[must_use]
    pub fn new(candidate: Candidate) -> Self {
        let precision = candidate.precision();
        Self {
            candidate,
            state: CandidateState::Unseen,
            precision,
        }
    }
}

/// Replays candidates at increasing precision.
pub struct Refiner {
    evaluator: Arc<Evaluator>,
    config: RefineConfig,
    parallel: bool,
}

impl Refiner {
    /// Creates a refiner; `parallel` spreads each round over the rayon pool.
    #[must_use]
    pub fn new(evaluator: Arc<Evaluator>, config: RefineConfig, parallel: bool) -> Self {
        Self {
            evaluator,
            config,
            parallel,
        }
    }

    /// The settings in force.
    #[must_use]
    pub fn config(&self) -> RefineConfig {
        self.config
    }

    /// Checks that `record` replays to its stored value.
    ///
    /// # Errors
    ///
    /// In strict mode a mismatch or failed replay is an error; in lenient
    /// mode it is logged and reported as `false`.
    pub fn verify_replay(&self, candidate: &Candidate, record: &ResultRecord) -> Result<bool, SearchError> {
        let replayed = match self.evaluator.replay_record(record, record.precision) {
            Ok(value) => value,
            Err(source) => {
                error!(key = %candidate.key, error = %source, "stored record cannot be replayed");
                return match self.config.replay_check {
                    ReplayCheck::Strict => Err(SearchError::Replay {
                        key: candidate.key.clone(),
                        source,
                    }),
                    ReplayCheck::Lenient => Ok(false),
                };
            }
        };
        if replayed == record.value {
            return Ok(true);
        }

        let digits = record.precision.digits();
        let expected = record.value.to_decimal_string(digits);
        let actual = replayed.to_decimal_string(digits);
        error!(key = %candidate.key, %expected, %actual, "replay mismatch");
        match self.config.replay_check {
            ReplayCheck::Strict => Err(SearchError::ReplayMismatch {
                key: candidate.key.clone(),
                expected,
                actual,
            }),
            ReplayCheck::Lenient => Ok(false),
        }
    }

    fn replay_at(&self, record: &ResultRecord, precision: Precision) -> Option<Number> {
        let space = if self.config.deepen {
            record.space.deepened(precision, self.config.base)
        } else {
            record.space.clone()
        };
        match self
            .evaluator
            .replay(record.algorithm, record.transform, &space, record.index, precision)
        {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(error = %e, %precision, "replay failed during refinement");
                None
            }
        }
    }

    /// Moves an unseen pair to `Candidate` or `Rejected`.
    ///
    /// # Errors
    ///
    /// See [`Refiner::verify_replay`].
    pub fn admit(&self, refinement: &mut Refinement) -> Result<(), SearchError> {
        let candidate = &refinement.candidate;
        let sound =
            self.verify_replay(candidate, &candidate.lhs)? && self.verify_replay(candidate, &candidate.rhs)?;
        refinement.state = if sound {
            CandidateState::Candidate
        } else {
            CandidateState::Rejected
        };
        Ok(())
    }

    /// Re-compares an active pair at `precision`.
    pub fn check(&self, refinement: &mut Refinement, precision: Precision) {
        let candidate = &refinement.candidate;
        let agrees = match (
            self.replay_at(&candidate.lhs, precision),
            self.replay_at(&candidate.rhs, precision),
        ) {
            (Some(lhs), Some(rhs)) => lhs.agrees_with(&rhs, precision.comparison_digits()),
            _ => false,
        };
        if agrees {
            refinement.state = CandidateState::Refined;
            refinement.precision = precision;
        } else {
            debug!(key = %candidate.key, %precision, "candidate rejected");
            refinement.state = CandidateState::Rejected;
        }
    }

    /// Refines every candidate to the ceiling.
    ///
    /// Rounds double the precision from the configured base until the
    /// ceiling is reached or no pair is left; pairs active at the end are
    /// confirmed.
    ///
    /// # Errors
    ///
    /// Returns an error only for replay mismatches in strict mode.
    pub fn refine_all(&self, candidates: Vec<Candidate>) -> Result<Vec<Refinement>, SearchError> {
        let mut refinements: Vec<Refinement> = candidates.into_iter().map(Refinement::new).collect();

        if self.parallel {
            refinements
                .par_iter_mut()
                .try_for_each(|r| self.admit(r))?;
        } else {
            refinements.iter_mut().try_for_each(|r| self.admit(r))?;
        }

        let mut precision = self.config.base;
        while precision < self.config.ceiling && refinements.iter().any(|r| r.state.is_active()) {
            precision = precision.doubled(self.config.ceiling);
            let round = |r: &mut Refinement| {
                if r.state.is_active() {
                    self.check(r, precision);
                }
            };
            if self.parallel {
                refinements.par_iter_mut().for_each(round);
            } else {
                refinements.iter_mut().for_each(round);
            }
            let surviving = refinements.iter().filter(|r| r.state.is_active()).count();
            info!(%precision, surviving, "refinement round finished");
        }

        for r in &mut refinements {
            if r.state.is_active() {
                r.state = CandidateState::Confirmed;
            }
        }
        Ok(refinements)
    }
}
