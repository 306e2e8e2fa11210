//! Generated sequence elements.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Integer coefficients of one polynomial, constant term first.
pub type CoefficientVector = SmallVec<[i64; 4]>;

/// One element of a sequence: a coefficient vector per group.
///
/// Polynomial generators emit one vector per coefficient group; digit
/// generators emit a single vector holding the digit pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element {
    groups: SmallVec<[CoefficientVector; 1]>,
}

impl Element {
    /// Creates an element from its groups.
    #[must_use]
    pub fn new(groups: impl IntoIterator<Item = CoefficientVector>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    /// Creates a single-group element.
    #[must_use]
    pub fn single(values: impl IntoIterator<Item = i64>) -> Self {
        Self::new([values.into_iter().collect()])
    }

    /// Returns the groups.
    #[must_use]
    pub fn groups(&self) -> &[CoefficientVector] {
        &self.groups
    }

    /// Returns every value, group after group.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.groups.iter().flat_map(|g| g.iter().copied())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .groups
            .iter()
            .map(|g| {
                let values: Vec<String> = g.iter().map(ToString::to_string).collect();
                format!("({})", values.join(", "))
            })
            .collect();
        write!(f, "[{}]", groups.join(", "))
    }
}
