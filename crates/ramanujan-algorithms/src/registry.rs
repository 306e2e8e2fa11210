//! Algorithm registry keyed by stable id.

use ramanujan_precision::{Number, Precision};
use rustc_hash::FxHashMap;

use crate::continued_fraction::continued_fraction_pair;
use crate::nested_radical::nested_radical;
use crate::polynomial::{self, XArg};
use crate::rational::rational_function;
use crate::{AlgorithmError, AlgorithmId, RegistryError};

/// Signature shared by every registered algorithm.
pub type AlgorithmFn = fn(&[Number], &[Number], Precision) -> Result<Number, AlgorithmError>;

/// Length contract an algorithm places on its `a` and `b` lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    /// Both lists hold exactly one value.
    Single,
    /// `b` is as long as `a` or one shorter.
    Staggered,
    /// Both lists have the same length.
    Equal,
    /// `a` holds coefficients, `b` a single point.
    CoefficientsAndPoint,
}

/// A registered algorithm.
#[derive(Clone, Copy, Debug)]
pub struct AlgorithmEntry {
    /// Stable identifier.
    pub id: AlgorithmId,
    /// Length contract.
    pub arity: Arity,
    /// The evaluation function.
    pub apply: AlgorithmFn,
}

impl AlgorithmEntry {
    /// Creates an entry.
    #[must_use]
    pub const fn new(id: AlgorithmId, arity: Arity, apply: AlgorithmFn) -> Self {
        Self { id, arity, apply }
    }

    /// Returns the algorithm's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}

/// Maps algorithm ids to their implementations.
#[derive(Clone, Debug, Default)]
pub struct AlgorithmRegistry {
    entries: FxHashMap<AlgorithmId, AlgorithmEntry>,
}

impl AlgorithmRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the four built-in algorithms.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for entry in Self::standard_entries() {
            let registered = registry.register(entry);
            debug_assert!(registered.is_ok(), "standard algorithm ids collide: {registered:?}");
        }
        registry
    }

    /// The built-in algorithms, one per [`AlgorithmId`].
    #[must_use]
    pub fn standard_entries() -> [AlgorithmEntry; 4] {
        [
            AlgorithmEntry::new(AlgorithmId::RationalFunction, Arity::Single, rational_function),
            AlgorithmEntry::new(AlgorithmId::ContinuedFraction, Arity::Staggered, continued_fraction_pair),
            AlgorithmEntry::new(AlgorithmId::NestedRadical, Arity::Equal, nested_radical),
            AlgorithmEntry::new(AlgorithmId::Polynomial, Arity::CoefficientsAndPoint, polynomial::polynomial),
        ]
    }

    /// Registers an algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateId`] if the id is already taken; the
    /// existing entry is kept.
    pub fn register(&mut self, entry: AlgorithmEntry) -> Result<(), RegistryError> {
        if self.entries.contains_key(&entry.id) {
            return Err(RegistryError::DuplicateId(entry.id.type_id()));
        }
        self.entries.insert(entry.id, entry);
        Ok(())
    }

    /// Looks up an algorithm.
    #[must_use]
    pub fn get(&self, id: AlgorithmId) -> Option<&AlgorithmEntry> {
        self.entries.get(&id)
    }

    /// Returns the number of registered algorithms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by_key(|e| e.id);
        entries.into_iter()
    }

    /// Applies an algorithm to already-evaluated argument lists.
    ///
    /// # Errors
    ///
    /// Returns the algorithm's error, or [`AlgorithmError::Unregistered`].
    pub fn apply(
        &self,
        id: AlgorithmId,
        a: &[Number],
        b: &[Number],
        precision: Precision,
    ) -> Result<Number, AlgorithmError> {
        let entry = self.get(id).ok_or(AlgorithmError::Unregistered(id))?;
        (entry.apply)(a, b, precision)
    }

    /// Evaluates both coefficient vectors at `x`, then applies the algorithm.
    ///
    /// A scalar `x` hands single-value lists to the algorithm; a sequence
    /// hands one value per point.
    ///
    /// # Errors
    ///
    /// See [`AlgorithmRegistry::apply`].
    pub fn solve(
        &self,
        id: AlgorithmId,
        a_coefficients: &[i64],
        b_coefficients: &[i64],
        x: &XArg,
        precision: Precision,
    ) -> Result<Number, AlgorithmError> {
        let a = polynomial::evaluate_at(a_coefficients, x, precision).into_vec();
        let b = polynomial::evaluate_at(b_coefficients, x, precision).into_vec();
        self.apply(id, &a, &b, precision)
    }
}
