//! Errors raised while parsing numeric text.

use thiserror::Error;

/// Errors from the precision layer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PrecisionError {
    /// Text that is not a decimal literal.
    #[error("malformed decimal literal: {0:?}")]
    MalformedDecimal(String),

    /// A constant symbol that is not recognised.
    #[error("unknown constant: {0:?}")]
    UnknownConstant(String),
}
