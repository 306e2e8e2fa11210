//! # ramanujan-algorithms
//!
//! The numeric algorithms of the identity search.
//!
//! Each algorithm maps two argument lists `a` and `b` to a [`Number`] and
//! carries a permanent [`AlgorithmId`]:
//! - Rational function (`a / b`)
//! - Continued fraction collapse
//! - Nested radical collapse
//! - Polynomial evaluation
//!
//! Argument lists come from evaluating integer coefficient vectors at a
//! single point or at an ordered sequence of points (see [`XArg`]).
//!
//! [`Number`]: ramanujan_precision::Number

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithm;
pub mod continued_fraction;
pub mod error;
pub mod nested_radical;
pub mod polynomial;
pub mod rational;
pub mod registry;

#[cfg(test)]
mod proptests;

pub use algorithm::AlgorithmId;
pub use continued_fraction::continued_fraction;
pub use error::{AlgorithmError, RegistryError};
pub use nested_radical::nested_radical;
pub use polynomial::{XArg, XValue};
pub use rational::rational_function;
pub use registry::{AlgorithmEntry, AlgorithmFn, AlgorithmRegistry, Arity};
