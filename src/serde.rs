//! # Serde module for Signature
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `Signature`. A signature is serialized as a flat sequence of its `u64` slots, so any
//! serde format (JSON arrays, bincode, ...) can carry it between processes where it may
//! be merged or compared with other signatures built from the same hash family.
//!
//! Deserialization rejects an empty sequence, since a signature must have at least one
//! slot. The hash family is not part of the serialized form; the caller rebuilds the
//! sketch with `Sketch::from_signature` and its own family.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::signature::Signature;

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mins: Vec<u64> = Deserialize::deserialize(deserializer)?;
        if mins.is_empty() {
            return Err(Error::custom("signature must have at least one slot"));
        }
        Ok(Signature::from(mins))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::sketch::Sketch;
    use std::sync::Arc;
    use test_case::test_case;

    #[test_case(0; "empty set")]
    #[test_case(1; "single element")]
    #[test_case(100; "hundred distinct elements")]
    #[test_case(10000; "ten thousand distinct elements")]
    fn test_serde(n: usize) {
        let mut original = Sketch::new(64).unwrap();
        for i in 0..n {
            original.push(&format!("item{}", i));
        }

        let serialized = serde_json::to_string(original.signature()).expect("serialization failed");
        assert!(
            !serialized.is_empty(),
            "serialized string should not be empty"
        );

        let deserialized: Signature =
            serde_json::from_str(&serialized).expect("deserialization failed");
        assert_eq!(original.signature(), &deserialized);

        let restored =
            Sketch::from_signature(Arc::clone(original.family()), deserialized.as_slice()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_serialized_form() {
        let sig = Signature::from(vec![1, 2, u64::MAX]);
        assert_eq!(
            serde_json::to_string(&sig).unwrap(),
            "[1,2,18446744073709551615]"
        );
    }

    #[test_case("[]".as_bytes(); "no slots")]
    #[test_case("{ invalid_json_string }".as_bytes(); "invalid json")]
    #[test_case("[1,-2]".as_bytes(); "negative slot")]
    #[test_case("[1,18446744073709551616]".as_bytes(); "slot overflow")]
    #[test_case("[1,null]".as_bytes(); "null slot")]
    fn test_failed_deserialization(input: &[u8]) {
        let result: Result<Signature, _> = serde_json::from_slice(input);
        assert!(result.is_err());
    }
}
