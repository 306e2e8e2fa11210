//! # ramanujan-postproc
//!
//! Unary transforms applied to algorithm results before storage.
//!
//! Each transform has a permanent [`TransformId`]. Id 0 is the identity and
//! also marks results stored without post-processing. Undefined results are
//! returned as sentinels, never raised:
//! - `inverse(0)` is infinite
//! - `sqrt` of a negative real is NaN
//! - `cot(0)` is NaN

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod registry;
pub mod transform;

#[cfg(test)]
mod proptests;

pub use error::{RegistryError, TransformError};
pub use registry::{TransformEntry, TransformRegistry};
pub use transform::{TransformFn, TransformId};
