//! # Ramanujan
//!
//! A numeric search for identities between closed forms and infinite
//! expansions.
//!
//! Two families of expressions are evaluated: closed forms built from
//! constants (the LHS) and expansions such as continued fractions and
//! nested radicals (the RHS). Results are filed in a store under a
//! truncated decimal key, colliding pairs are replayed at increasing
//! precision, and pairs that still agree are reported as identities.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ramanujan::prelude::*;
//!
//! let config = SearchConfig { synchronous: true, ..SearchConfig::default() };
//! let pipeline = Pipeline::open(config, Arc::new(MemoryBackend::new()))?;
//! let summary = pipeline.run(Path::new("."))?;
//! println!("{} identities", summary.search.confirmed());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;

#[cfg(test)]
mod proptests;

pub use config::{SearchConfig, SideConfig};
pub use error::Error;
pub use pipeline::{GenerateSummary, Pipeline, RunSummary, SideSummary};

pub use ramanujan_algorithms as algorithms;
pub use ramanujan_dispatch as dispatch;
pub use ramanujan_postproc as postproc;
pub use ramanujan_precision as precision;
pub use ramanujan_search as search;
pub use ramanujan_sequences as sequences;
pub use ramanujan_store as store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{Error, Pipeline, SearchConfig, SideConfig};
    pub use ramanujan_algorithms::AlgorithmId;
    pub use ramanujan_postproc::TransformId;
    pub use ramanujan_precision::{Constant, Number, Precision};
    pub use ramanujan_search::{Report, SearchSummary};
    pub use ramanujan_sequences::{PairSpace, Points, SequenceSpec};
    pub use ramanujan_store::{BucketStore, MemoryBackend, Side};
}
