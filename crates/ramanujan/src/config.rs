//! Search configuration.
//!
//! A [`SearchConfig`] is read from a JSON file. Every field has a default,
//! so a file only needs the settings it changes; the defaults describe a
//! small search for continued fractions of `e`.

use ramanujan_algorithms::AlgorithmId;
use ramanujan_dispatch::{DispatchConfig, SidePlan};
use ramanujan_precision::{Constant, Precision};
use ramanujan_search::{RefineConfig, ReplayCheck};
use ramanujan_sequences::{PairSpace, Points, SequenceSpec};
use ramanujan_store::{RetryPolicy, Side};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::Error;

/// What one side generates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideConfig {
    /// Algorithm ids applied to every `(a, b)` pair.
    pub algorithms: Vec<AlgorithmId>,
    /// Whether every transform is applied, or only the identity.
    pub run_postproc: bool,
    /// Integer results that are never stored.
    pub black_list: Vec<i64>,
    /// Generators of the `a` arguments.
    pub a_sequences: Vec<SequenceSpec>,
    /// Generators of the `b` arguments.
    pub b_sequences: Vec<SequenceSpec>,
}

impl SideConfig {
    /// Expands the side into pair spaces.
    ///
    /// Every `a` generator is paired with every `b` generator. A pair with
    /// a generator that has no points of its own is evaluated once per
    /// constant, with unbound generators bound to it.
    #[must_use]
    pub fn plan(&self, side: Side, constants: &[Constant]) -> SidePlan {
        let mut spaces: Vec<PairSpace> = Vec::new();
        for a in &self.a_sequences {
            for b in &self.b_sequences {
                let bound = !(a.has_points() && b.has_points()) && !constants.is_empty();
                let candidates: Vec<PairSpace> = if bound {
                    constants
                        .iter()
                        .map(|&c| PairSpace::new(a.bind_constant(c), b.bind_constant(c)))
                        .collect()
                } else {
                    vec![PairSpace::new(a.clone(), b.clone())]
                };
                for space in candidates {
                    if !spaces.contains(&space) {
                        spaces.push(space);
                    }
                }
            }
        }
        SidePlan {
            side,
            algorithms: self.algorithms.clone(),
            run_postproc: self.run_postproc,
            black_list: self.black_list.clone(),
            spaces,
        }
    }

    fn validate(&self, side: Side) -> Result<(), Error> {
        for spec in self.a_sequences.iter().chain(&self.b_sequences) {
            spec.validate()?;
        }
        let generates = !self.a_sequences.is_empty() && !self.b_sequences.is_empty();
        if generates && self.algorithms.is_empty() {
            return Err(Error::InvalidConfig(format!("{side} has sequences but no algorithms")));
        }
        Ok(())
    }
}

/// Everything a search run needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fractional digits kept in a bucket key.
    ///
    /// The integer part is always kept whole, so for values of magnitude
    /// 10^k a key holds `k + 1 + hash_precision` significant digits.
    pub hash_precision: usize,
    /// Precision results are generated at.
    pub working_precision: Precision,
    /// Precision at which agreeing pairs are confirmed.
    pub max_precision: Precision,
    /// Pairs per batch.
    pub batch_size: u64,
    /// Outstanding batches to drain down to between phases.
    pub min_workqueue_size: usize,
    /// Outstanding batches above which submission pauses.
    pub max_workqueue_size: usize,
    /// How long finished batch results are kept.
    pub job_result_ttl_secs: u64,
    /// Sleep between queue polls.
    pub poll_interval_ms: u64,
    /// Worker threads; 0 uses one per CPU.
    pub workers: usize,
    /// Backoff for transient queue and store failures.
    pub retry: RetryPolicy,
    /// Closed forms.
    pub lhs: SideConfig,
    /// Expansions.
    pub rhs: SideConfig,
    /// Constants that unbound generators are evaluated at.
    pub constants: Vec<Constant>,
    /// What a replay mismatch does.
    pub replay_check: ReplayCheck,
    /// Lengthen point ranges while refining.
    pub deepen_on_refine: bool,
    /// Run batches and refinement on the calling thread.
    pub synchronous: bool,
}

fn polynomial(groups: &[&[[i64; 2]]], points: Option<Points>) -> Vec<SequenceSpec> {
    SequenceSpec::polynomial(groups, points).into_iter().collect()
}

impl Default for SearchConfig {
    fn default() -> Self {
        let points = Some(Points::Range { start: 0, end: 201 });
        Self {
            hash_precision: 10,
            working_precision: Precision::DEFAULT,
            max_precision: Precision::new(50),
            batch_size: 100,
            min_workqueue_size: 10,
            max_workqueue_size: 100,
            job_result_ttl_secs: 1800,
            poll_interval_ms: 100,
            workers: 0,
            retry: RetryPolicy::default(),
            lhs: SideConfig {
                algorithms: vec![AlgorithmId::RationalFunction],
                run_postproc: false,
                black_list: Vec::new(),
                a_sequences: polynomial(&[&[[0, 3], [0, 3]]], None),
                b_sequences: polynomial(&[&[[1, 3], [0, 2]]], None),
            },
            rhs: SideConfig {
                algorithms: vec![AlgorithmId::ContinuedFraction],
                run_postproc: false,
                black_list: Vec::new(),
                a_sequences: polynomial(&[&[[1, 4], [0, 2], [0, 1]]], points.clone()),
                b_sequences: polynomial(&[&[[0, 2], [-1, 1], [0, 1]]], points),
            },
            constants: vec![Constant::E],
            replay_check: ReplayCheck::Lenient,
            deepen_on_refine: false,
            synchronous: false,
        }
    }
}

impl SearchConfig {
    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// [`SearchConfig::validate`].
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed or the result invalid.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the settings are consistent.
    ///
    /// Keys keep `hash_precision` fractional digits, which is coarser than
    /// the comparison at the working precision only while the integer part
    /// has at most `comparison_digits - hash_precision` digits. Larger
    /// values that agree may land in different buckets and are not paired.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] or the first invalid generator.
    pub fn validate(&self) -> Result<(), Error> {
        let comparison = self.working_precision.comparison_digits();
        if self.hash_precision == 0 || self.hash_precision > comparison {
            return Err(Error::InvalidConfig(format!(
                "hash_precision must be between 1 and {comparison}, got {}",
                self.hash_precision
            )));
        }
        if self.max_precision < self.working_precision {
            return Err(Error::InvalidConfig(format!(
                "max_precision {} is below working_precision {}",
                self.max_precision, self.working_precision
            )));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be positive".to_string()));
        }
        if self.min_workqueue_size > self.max_workqueue_size {
            return Err(Error::InvalidConfig(format!(
                "min_workqueue_size {} exceeds max_workqueue_size {}",
                self.min_workqueue_size, self.max_workqueue_size
            )));
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::InvalidConfig("retry.max_attempts must be positive".to_string()));
        }
        self.lhs.validate(Side::Lhs)?;
        self.rhs.validate(Side::Rhs)
    }

    /// The generation plan of one side.
    #[must_use]
    pub fn plan(&self, side: Side) -> SidePlan {
        match side {
            Side::Lhs => self.lhs.plan(side, &self.constants),
            Side::Rhs => self.rhs.plan(side, &self.constants),
        }
    }

    /// Queue settings for the dispatcher.
    #[must_use]
    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            batch_size: self.batch_size,
            min_workqueue_size: self.min_workqueue_size,
            max_workqueue_size: self.max_workqueue_size,
            poll_interval_ms: self.poll_interval_ms,
            retry: self.retry,
        }
    }

    /// Refinement settings.
    #[must_use]
    pub fn refine_config(&self) -> RefineConfig {
        RefineConfig {
            base: self.working_precision,
            ceiling: self.max_precision,
            deepen: self.deepen_on_refine,
            replay_check: self.replay_check,
        }
    }

    /// How long a finished batch result stays collectable.
    #[must_use]
    pub fn job_result_ttl(&self) -> Duration {
        Duration::from_secs(self.job_result_ttl_secs)
    }
}
