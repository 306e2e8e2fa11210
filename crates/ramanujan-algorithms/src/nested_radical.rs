//! Nested radical collapse.

use ramanujan_precision::{Number, Precision};

use crate::{AlgorithmError, AlgorithmId};

/// Collapses `sqrt(a[0] + b[0] * sqrt(a[1] + b[1] * sqrt(... )))` from the
/// right, seeding the innermost root with one.
///
/// Roots of negative values take the principal complex branch.
///
/// # Errors
///
/// Returns [`AlgorithmError::LengthMismatch`] unless `a` and `b` have the
/// same length.
pub fn nested_radical(a: &[Number], b: &[Number], precision: Precision) -> Result<Number, AlgorithmError> {
    if a.len() != b.len() {
        return Err(AlgorithmError::LengthMismatch {
            algorithm: AlgorithmId::NestedRadical,
            a: a.len(),
            b: b.len(),
        });
    }

    let mut root = Number::from_i64(1, precision.working_digits());
    for (a_val, b_val) in a.iter().rev().zip(b.iter().rev()) {
        root = (&(b_val * &root) + a_val).sqrt();
    }

    Ok(root)
}
