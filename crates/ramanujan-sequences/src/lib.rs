//! # ramanujan-sequences
//!
//! Deterministic generators for the coefficient space of the search.
//!
//! This crate provides:
//! - Polynomial coefficient sequences over per-coefficient ranges
//! - Periodic digit-pattern sequences
//! - Serializable generator references ([`SequenceSpec`])
//! - Random access into a sequence and into the product of two
//! - A shared cache of evaluated elements
//!
//! Every generator is a pure function of its arguments. The element at a
//! given index can be rebuilt without generating the ones before it, which
//! is what lets a stored result be replayed from `(spec, index)` alone.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod digits;
pub mod element;
pub mod error;
pub mod polynomial;
pub mod product;
pub mod range;
pub mod spec;

#[cfg(test)]
mod proptests;

pub use cache::SequenceCache;
pub use digits::DigitSequence;
pub use element::{CoefficientVector, Element};
pub use error::SequenceError;
pub use polynomial::{Points, PolynomialSequence};
pub use product::PairSpace;
pub use range::CoefficientRange;
pub use spec::SequenceSpec;
