//! Node in the tech graph.

use serde::{Deserialize, Serialize};
use super::{AttributeMap, Logic, ParentGroup, Value};

/// A node: a unique identifier plus its attributes and prerequisite groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub attributes: AttributeMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_groups: Vec<ParentGroup>,
    #[serde(default, rename = "all_parents", skip_serializing_if = "Option::is_none")]
    pub logic: Option<Logic>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: AttributeMap::new(),
            parent_groups: Vec::new(),
            logic: None,
        }
    }

    pub fn with_parent_groups(mut self, groups: impl IntoIterator<Item = ParentGroup>) -> Self {
        self.parent_groups = groups.into_iter().collect();
        self
    }

    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = Some(logic);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn has_parent_groups(&self) -> bool {
        !self.parent_groups.is_empty()
    }
}

/// Detached copy of a node together with its neighborhood.
///
/// Returned by [`crate::TechGraph::node_info`]; edits made to it only reach the
/// graph through [`crate::TechGraph::apply_node_info`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    pub attributes: AttributeMap,
    pub parent_groups: Vec<ParentGroup>,
    pub logic: Option<Logic>,
    /// Direct predecessors.
    pub parents: Vec<String>,
    /// Direct successors.
    pub children: Vec<String>,
}
