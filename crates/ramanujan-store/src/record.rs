//! Stored provenance records.
//!
//! Records are serialized as JSON with an explicit schema version. Numbers
//! are written as exact decimal strings and coefficients as integers, so a
//! record round-trips without passing through floating point.

use ramanujan_algorithms::AlgorithmId;
use ramanujan_postproc::TransformId;
use ramanujan_precision::{Number, Precision};
use ramanujan_sequences::{Element, PairSpace};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Side, StoreError};

/// Version written into every record.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Deserialize)]
struct Versioned {
    schema: u32,
}

fn check_schema(json: &str) -> Result<(), StoreError> {
    let Versioned { schema } = serde_json::from_str(json)?;
    if schema == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(StoreError::UnknownSchema(schema))
    }
}

/// One evaluated result and everything needed to reproduce it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Schema version, always [`SCHEMA_VERSION`] when written.
    pub schema: u32,
    /// Which family produced the value.
    pub side: Side,
    /// The algorithm applied to the arguments.
    pub algorithm: AlgorithmId,
    /// The transform applied to the algorithm's result.
    pub transform: TransformId,
    /// Working precision of the evaluation.
    pub precision: Precision,
    /// The transformed value.
    pub value: Number,
    /// The generators of the `a` and `b` arguments.
    pub space: PairSpace,
    /// Index of the argument pair in the full product of `space`.
    pub index: u64,
    /// The `a` element at that index.
    pub a: Element,
    /// The `b` element at that index.
    pub b: Element,
}

impl ResultRecord {
    /// Serializes the record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if encoding fails.
    pub fn encode(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a record, rejecting unknown schema versions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownSchema`] or [`StoreError::Serialization`].
    pub fn decode(json: &str) -> Result<Self, StoreError> {
        check_schema(json)?;
        Ok(serde_json::from_str(json)?)
    }

    /// The value rendered at the record's precision.
    #[must_use]
    pub fn rendered_value(&self) -> String {
        self.value.to_decimal_string(self.precision.digits())
    }
}

/// A confirmed pair of results that agreed up to `precision`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Schema version, always [`SCHEMA_VERSION`] when written.
    pub schema: u32,
    /// The closed-form side.
    pub lhs: ResultRecord,
    /// The expansion side.
    pub rhs: ResultRecord,
    /// Highest precision at which the two sides agreed.
    pub precision: Precision,
}

impl MatchRecord {
    /// Pairs two records.
    #[must_use]
    pub fn new(lhs: ResultRecord, rhs: ResultRecord, precision: Precision) -> Self {
        Self {
            schema: SCHEMA_VERSION,
            lhs,
            rhs,
            precision,
        }
    }

    /// Serializes the match.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if encoding fails.
    pub fn encode(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a match, rejecting unknown schema versions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownSchema`] or [`StoreError::Serialization`].
    pub fn decode(json: &str) -> Result<Self, StoreError> {
        check_schema(json)?;
        Ok(serde_json::from_str(json)?)
    }

    /// The storage key, `match:<sha256 of the serialized pair>`.
    ///
    /// The confirming precision is excluded, so the same pair confirmed at
    /// two ceilings lands under one key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if encoding fails.
    pub fn storage_key(&self) -> Result<String, StoreError> {
        let pair = serde_json::to_string(&(&self.lhs, &self.rhs))?;
        Ok(format!("match:{:x}", Sha256::digest(pair.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ramanujan_sequences::SequenceSpec;

    fn sample(side: Side, value: i64) -> ResultRecord {
        let space = PairSpace::new(
            SequenceSpec::polynomial(&[&[[0, 3]]], None).unwrap(),
            SequenceSpec::polynomial(&[&[[1, 2]]], None).unwrap(),
        );
        let (a, b) = space.nth(0).unwrap();
        ResultRecord {
            schema: SCHEMA_VERSION,
            side,
            algorithm: AlgorithmId::RationalFunction,
            transform: TransformId::Identity,
            precision: Precision::new(15),
            value: Number::from_i64(value, 25),
            space,
            index: 0,
            a,
            b,
        }
    }

    #[test]
    fn test_roundtrip() {
        let record = sample(Side::Lhs, 3);
        let json = record.encode().unwrap();
        assert_eq!(ResultRecord::decode(&json).unwrap(), record);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(
            sample(Side::Rhs, 5).encode().unwrap(),
            sample(Side::Rhs, 5).encode().unwrap()
        );
    }

    #[test]
    fn test_unknown_schema_rejected() {
        let mut record = sample(Side::Lhs, 3);
        record.schema = 99;
        let json = record.encode().unwrap();
        assert!(matches!(ResultRecord::decode(&json), Err(StoreError::UnknownSchema(99))));
    }

    #[test]
    fn test_value_is_an_exact_string() {
        let json = sample(Side::Lhs, 3).encode().unwrap();
        assert!(json.contains(r#""value":{"kind":"real","value":"3"}"#), "{json}");
    }

    #[test]
    fn test_match_key_ignores_precision() {
        let first = MatchRecord::new(sample(Side::Lhs, 3), sample(Side::Rhs, 3), Precision::new(30));
        let second = MatchRecord::new(sample(Side::Lhs, 3), sample(Side::Rhs, 3), Precision::new(50));
        let key = first.storage_key().unwrap();
        assert!(key.starts_with("match:"));
        assert_eq!(key.len(), "match:".len() + 64);
        assert_eq!(key, second.storage_key().unwrap());
        assert_eq!(MatchRecord::decode(&first.encode().unwrap()).unwrap(), first);
    }
}
