//! Attribute maps on nodes and edges.

use std::collections::HashMap;
use super::Value;

/// A map of attribute names to values.
pub type AttributeMap = HashMap<String, Value>;

/// Build an AttributeMap from (key, value) pairs.
pub fn attributes<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> AttributeMap
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Merge `incoming` into `target`; keys present in both take the incoming value.
pub fn merge_attributes(target: &mut AttributeMap, incoming: AttributeMap) {
    for (key, value) in incoming {
        target.insert(key, value);
    }
}
