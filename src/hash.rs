//! Order-insensitive hashing of attribute values.
//!
//! Two attribute mappings that differ only in the order of their list
//! members (or their key order) hash the same: list-valued members of a map
//! are sorted before encoding, and the encoding writes map keys in sorted
//! order.

use std::cmp::Ordering;

use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::model::{AttributeMap, Value};
use crate::{Error, Result};

/// Digest applied to the canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    fn hex_digest(self, bytes: &[u8]) -> String {
        match self {
            HashAlgorithm::Sha224 => format!("{:x}", Sha224::digest(bytes)),
            HashAlgorithm::Sha256 => format!("{:x}", Sha256::digest(bytes)),
            HashAlgorithm::Sha384 => format!("{:x}", Sha384::digest(bytes)),
            HashAlgorithm::Sha512 => format!("{:x}", Sha512::digest(bytes)),
        }
    }
}

/// Hex digest of `value`.
///
/// For a map, every list-valued member is sorted first. Any other value is
/// encoded as is. Fails with [`Error::TypeError`] when a list holds members
/// that cannot be ordered against each other.
pub fn hash_value(value: &Value, algorithm: HashAlgorithm) -> Result<String> {
    let canonical = match value {
        Value::Map(map) => {
            let mut map = map.clone();
            for member in map.values_mut() {
                if let Value::List(items) = member {
                    *items = sorted(items)?;
                }
            }
            Value::Map(map)
        }
        other => other.clone(),
    };

    Ok(algorithm.hex_digest(encode(&canonical)?.as_bytes()))
}

/// [`hash_value`] over an attribute mapping.
pub fn hash_attributes(attrs: &AttributeMap, algorithm: HashAlgorithm) -> Result<String> {
    hash_value(&Value::Map(attrs.clone()), algorithm)
}

/// Stable merge sort that stops at the first incomparable pair.
fn sorted(items: &[Value]) -> Result<Vec<Value>> {
    if items.len() <= 1 {
        return Ok(items.to_vec());
    }
    let (left, right) = items.split_at(items.len() / 2);
    let mut left = sorted(left)?.into_iter().peekable();
    let mut right = sorted(right)?.into_iter().peekable();

    let mut merged = Vec::with_capacity(items.len());
    while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
        let ord = a.try_cmp(b).ok_or_else(|| Error::TypeError {
            expected: "mutually comparable list members".into(),
            got: format!("{} and {}", a.type_name(), b.type_name()),
        })?;
        if ord == Ordering::Greater {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}

/// Compact JSON with map keys in sorted order. Converting through
/// `serde_json::Value` puts every object into a sorted `serde_json::Map`.
fn encode(value: &Value) -> Result<String> {
    serde_json::to_value(value)
        .and_then(|json| serde_json::to_string(&json))
        .map_err(|e| Error::Format(format!("cannot encode value: {e}")))
}
