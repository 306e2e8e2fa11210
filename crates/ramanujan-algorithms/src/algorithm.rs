//! Stable algorithm identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::RegistryError;

/// Identifies an algorithm on the wire and in stored records.
///
/// The numeric ids are permanent: they are written into every stored result
/// and must never be reused or renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum AlgorithmId {
    /// `a / b` for single values.
    RationalFunction = 0,
    /// Right-to-left continued fraction collapse.
    ContinuedFraction = 1,
    /// Right-to-left nested square root collapse.
    NestedRadical = 2,
    /// Polynomial evaluation at a point.
    Polynomial = 3,
}

impl AlgorithmId {
    /// All algorithms, in id order.
    pub const ALL: [Self; 4] = [
        Self::RationalFunction,
        Self::ContinuedFraction,
        Self::NestedRadical,
        Self::Polynomial,
    ];

    /// Returns the stable numeric id.
    #[must_use]
    pub const fn type_id(self) -> u8 {
        self as u8
    }

    /// Looks up an algorithm by its numeric id.
    ///
    /// # Errors
    ///
    /// Returns an error if no algorithm has this id.
    pub fn from_type_id(id: u8) -> Result<Self, RegistryError> {
        Self::ALL
            .into_iter()
            .find(|a| a.type_id() == id)
            .ok_or(RegistryError::UnknownId(id))
    }

    /// Returns the algorithm's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RationalFunction => "rational_function",
            Self::ContinuedFraction => "continued_fraction",
            Self::NestedRadical => "nested_radical",
            Self::Polynomial => "polynomial",
        }
    }
}

impl TryFrom<u8> for AlgorithmId {
    type Error = RegistryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_type_id(value)
    }
}

impl From<AlgorithmId> for u8 {
    fn from(value: AlgorithmId) -> Self {
        value.type_id()
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
