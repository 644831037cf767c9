//! Edge in the tech graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::{AttributeMap, Value};

/// Disambiguates parallel edges between the same ordered pair.
///
/// Integer keys are what the store assigns on its own; string keys come from
/// compound identifiers whose key part is not an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeKey {
    Int(i64),
    Name(String),
}

impl Default for EdgeKey {
    fn default() -> Self {
        EdgeKey::Int(0)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKey::Int(i) => write!(f, "{i}"),
            EdgeKey::Name(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for EdgeKey { fn from(v: i64) -> Self { EdgeKey::Int(v) } }
impl From<i32> for EdgeKey { fn from(v: i32) -> Self { EdgeKey::Int(v as i64) } }
impl From<&str> for EdgeKey { fn from(v: &str) -> Self { EdgeKey::Name(v.to_owned()) } }
impl From<String> for EdgeKey { fn from(v: String) -> Self { EdgeKey::Name(v) } }

impl From<EdgeKey> for Value {
    fn from(key: EdgeKey) -> Self {
        match key {
            EdgeKey::Int(i) => Value::Int(i),
            EdgeKey::Name(s) => Value::String(s),
        }
    }
}

/// Identity of an edge: (source, target, key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    pub source: String,
    pub target: String,
    pub key: EdgeKey,
}

impl EdgeId {
    pub fn new(source: impl Into<String>, target: impl Into<String>, key: impl Into<EdgeKey>) -> Self {
        Self { source: source.into(), target: target.into(), key: key.into() }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} [{}]", self.source, self.target, self.key)
    }
}

/// A directed edge with its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub key: EdgeKey,
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl Edge {
    pub fn new(id: EdgeId, attributes: AttributeMap) -> Self {
        Self { source: id.source, target: id.target, key: id.key, attributes }
    }

    pub fn id(&self) -> EdgeId {
        EdgeId::new(self.source.clone(), self.target.clone(), self.key.clone())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}
