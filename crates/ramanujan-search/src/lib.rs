//! # ramanujan-search
//!
//! Search side of the pipeline: turning a filled bucket store into
//! confirmed identities.
//!
//! This crate provides:
//! - The bucket join that pairs colliding LHS and RHS records
//! - Replay verification and precision-doubling refinement
//! - Closed-form rendering of stored records
//! - Match reports written to numbered result files
//!
//! A search never trusts a stored value on its own: every candidate is
//! first replayed from its generator reference, then recomputed at each
//! higher precision before it is recorded as a match.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod candidate;
pub mod error;
pub mod refine;
pub mod render;
pub mod report;
pub mod search;

#[cfg(test)]
mod proptests;

pub use candidate::{accepts_transforms, find_candidates, is_candidate, Candidate};
pub use error::SearchError;
pub use refine::{CandidateState, RefineConfig, Refinement, Refiner, ReplayCheck};
pub use render::{closed_form, describe, polynomial_to_string};
pub use report::{next_report_path, Report, ReportEntry};
pub use search::{search, SearchSummary};
