//! # ramanujan-precision
//!
//! Explicit-precision decimal arithmetic for the identity search.
//!
//! This crate builds on `dashu` integers to provide:
//! - Decimal reals with a per-value precision (`Real`)
//! - Complex numbers over those reals (`Complex`)
//! - Results with NaN and infinity sentinels (`Number`)
//! - Elementary functions and named constants (`Constant`)
//!
//! There is no ambient working precision. Every value carries the number of
//! significant digits it was computed with, and every entry point takes a
//! [`Precision`] or a digit count.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod complex;
pub mod constants;
pub mod elementary;
pub mod error;
pub mod number;
pub mod precision;
pub mod real;

#[cfg(test)]
mod proptests;

pub use complex::Complex;
pub use constants::Constant;
pub use error::PrecisionError;
pub use number::{Number, MAX_MAGNITUDE};
pub use precision::{Precision, COMPARISON_MARGIN, GUARD_DIGITS, MIN_DIGITS};
pub use real::Real;
