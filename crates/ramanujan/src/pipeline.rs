//! The generate, search and report phases over one store.

use ramanujan_dispatch::{
    plan_batches, BatchReport, Dispatcher, Evaluator, InlineQueue, LocalQueue, StoreBatch, WorkQueue,
};
use ramanujan_search::{Refiner, Report, SearchSummary};
use ramanujan_store::{Backend, BucketStore, Side};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{Error, SearchConfig};

/// Generation counts of one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SideSummary {
    /// Batches submitted.
    pub batches: usize,
    /// Batches that failed.
    pub failed: usize,
    /// Batches whose result expired before collection.
    pub expired: usize,
    /// Counts summed over finished batches.
    pub report: BatchReport,
}

/// Generation counts of both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Closed forms.
    pub lhs: SideSummary,
    /// Expansions.
    pub rhs: SideSummary,
}

/// Everything a full run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Generation counts.
    pub generated: GenerateSummary,
    /// Search outcome.
    pub search: SearchSummary,
    /// The report written.
    pub report: PathBuf,
}

/// A configured search over a store.
pub struct Pipeline<B: Backend + 'static> {
    config: SearchConfig,
    store: Arc<BucketStore<B>>,
    evaluator: Arc<Evaluator>,
}

impl<B: Backend + 'static> Pipeline<B> {
    /// Validates `config` and opens the store on `backend` at the configured
    /// key accuracy.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the backend fails.
    pub fn open(config: SearchConfig, backend: Arc<B>) -> Result<Self, Error> {
        config.validate()?;
        let store = BucketStore::open(backend, config.hash_precision, config.retry)?;
        store.set_accuracy(config.hash_precision)?;
        Ok(Self {
            config,
            store: Arc::new(store),
            evaluator: Arc::new(Evaluator::standard()),
        })
    }

    /// The configuration in force.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The store.
    #[must_use]
    pub fn store(&self) -> &Arc<BucketStore<B>> {
        &self.store
    }

    /// Evaluates both sides into the store.
    ///
    /// Failed batches are counted and logged, not resubmitted.
    ///
    /// # Errors
    ///
    /// Returns an error if a generator is invalid, the worker pool cannot be
    /// built or batches cannot be enqueued.
    pub fn generate(&self) -> Result<GenerateSummary, Error> {
        Ok(GenerateSummary {
            lhs: self.generate_side(Side::Lhs)?,
            rhs: self.generate_side(Side::Rhs)?,
        })
    }

    fn generate_side(&self, side: Side) -> Result<SideSummary, Error> {
        let plan = self.config.plan(side);
        let batches = plan_batches(&plan, self.config.working_precision, self.config.batch_size)?;
        info!(
            %side,
            spaces = plan.spaces.len(),
            evaluations = plan.evaluations()?,
            batches = batches.len(),
            "generating"
        );
        let tasks = batches.into_iter().map(|batch| StoreBatch {
            batch,
            evaluator: Arc::clone(&self.evaluator),
            store: Arc::clone(&self.store),
        });

        let summary = if self.config.synchronous {
            self.dispatch(&InlineQueue::<StoreBatch<B>>::new(), tasks)?
        } else {
            let queue = LocalQueue::<StoreBatch<B>>::new(self.config.workers, self.config.job_result_ttl())?;
            self.dispatch(&queue, tasks)?
        };
        if summary.failed > 0 || summary.expired > 0 {
            warn!(%side, failed = summary.failed, expired = summary.expired, "some batches did not finish");
        }
        Ok(summary)
    }

    fn dispatch<Q, I>(&self, queue: &Q, tasks: I) -> Result<SideSummary, Error>
    where
        Q: WorkQueue<StoreBatch<B>>,
        I: IntoIterator<Item = StoreBatch<B>>,
    {
        let dispatched = Dispatcher::new(queue, self.config.dispatch_config()).run(tasks)?;
        for failure in &dispatched.failures {
            warn!(error = %failure, "batch failed");
        }
        let mut report = BatchReport::default();
        for output in &dispatched.outputs {
            report += *output;
        }
        Ok(SideSummary {
            batches: dispatched.submitted,
            failed: dispatched.failed(),
            expired: dispatched.expired,
            report,
        })
    }

    /// Finds, refines and records matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a strict replay check trips.
    pub fn search(&self) -> Result<SearchSummary, Error> {
        let refiner = Refiner::new(
            Arc::clone(&self.evaluator),
            self.config.refine_config(),
            !self.config.synchronous,
        );
        Ok(ramanujan_search::search(&self.store, &refiner)?)
    }

    /// Writes every stored match to a new report file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the matches cannot be read or the file written.
    pub fn report(&self, dir: &Path) -> Result<PathBuf, Error> {
        let matches = self.store.matches()?;
        Ok(Report::build(&matches).write_to(dir)?)
    }

    /// Generates, searches and writes a report.
    ///
    /// # Errors
    ///
    /// Returns the first error of any phase.
    pub fn run(&self, dir: &Path) -> Result<RunSummary, Error> {
        let generated = self.generate()?;
        let search = self.search()?;
        let report = self.report(dir)?;
        Ok(RunSummary {
            generated,
            search,
            report,
        })
    }

    /// Empties the store, keeping the configured accuracy.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn clear(&self) -> Result<(), Error> {
        Ok(self.store.clear(self.config.hash_precision)?)
    }
}
