//! In-memory graph store.
//!
//! This is the reference implementation of `GraphStore`. Nodes live in a
//! hashbrown map with a side vector recording insertion order; every edge is
//! keyed by its full `(source, target, key)` identity and indexed from both
//! endpoints.
//!
//! ## Limitations
//!
//! - **No locking**: mutation takes `&mut self`. Share it across threads by
//!   wrapping the whole store, not individual calls.
//! - **Linear removals**: removing a node or edge rescans the affected
//!   adjacency lists and the order vector.

use hashbrown::{HashMap, HashSet};

use crate::model::*;
use crate::{Error, Result};
use super::GraphStore;

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory directed multigraph.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Node ids in insertion order.
    order: Vec<String>,
    nodes: HashMap<String, Node>,
    edges: HashMap<EdgeId, AttributeMap>,
    /// node id → incident edge ids
    adjacency: HashMap<String, Adjacency>,
}

#[derive(Debug, Clone, Default)]
struct Adjacency {
    outgoing: Vec<EdgeId>,
    incoming: Vec<EdgeId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, id: &str) -> bool {
        if self.nodes.contains_key(id) {
            return false;
        }
        self.order.push(id.to_string());
        self.nodes.insert(id.to_string(), Node::new(id));
        self.adjacency.insert(id.to_string(), Adjacency::default());
        true
    }

    /// Ids of every edge touching `id`, self-loops once.
    fn incident_edges(&self, id: &str) -> Vec<EdgeId> {
        let Some(adj) = self.adjacency.get(id) else {
            return Vec::new();
        };
        let mut ids = adj.outgoing.clone();
        ids.extend(adj.incoming.iter().filter(|e| e.source != e.target).cloned());
        ids
    }

    fn distinct<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
        let mut seen: HashSet<&String> = HashSet::new();
        ids.filter(|id| seen.insert(*id)).cloned().collect()
    }
}

// ============================================================================
// GraphStore impl
// ============================================================================

impl GraphStore for MemoryStore {
    // ========================================================================
    // Node CRUD
    // ========================================================================

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    fn node_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    fn get_node(&self, id: &str) -> Option<Node> {
        self.nodes.get(id).cloned()
    }

    fn add_node(&mut self, id: &str, attrs: AttributeMap) -> bool {
        let created = self.ensure_node(id);
        if let Some(node) = self.nodes.get_mut(id) {
            merge_attributes(&mut node.attributes, attrs);
        }
        created
    }

    fn put_node(&mut self, node: Node) {
        self.ensure_node(&node.id);
        self.nodes.insert(node.id.clone(), node);
    }

    fn set_node_attribute(&mut self, id: &str, key: &str, val: Value) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or_else(|| Error::NotFound(format!("Node {id}")))?;
        node.attributes.insert(key.to_string(), val);
        Ok(())
    }

    fn remove_node_attribute(&mut self, id: &str, key: &str) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or_else(|| Error::NotFound(format!("Node {id}")))?;
        node.attributes.remove(key);
        Ok(())
    }

    fn remove_node(&mut self, id: &str) -> bool {
        for edge in self.incident_edges(id) {
            self.remove_edge(&edge);
        }
        self.adjacency.remove(id);
        let removed = self.nodes.remove(id).is_some();
        if removed {
            self.order.retain(|n| n != id);
        }
        removed
    }

    fn rename_node(&mut self, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }
        if !self.nodes.contains_key(old) {
            return Err(Error::NotFound(format!("Node {old}")));
        }

        // Detach the old node's edges, keeping their attributes.
        let mut moved = Vec::new();
        for id in self.incident_edges(old) {
            if let Some(attrs) = self.edges.get(&id).cloned() {
                moved.push((id.clone(), attrs));
            }
            self.remove_edge(&id);
        }

        let Some(mut node) = self.nodes.remove(old) else {
            return Err(Error::NotFound(format!("Node {old}")));
        };
        self.adjacency.remove(old);
        node.id = new.to_string();

        match self.nodes.get_mut(new) {
            Some(existing) => {
                merge_attributes(&mut existing.attributes, node.attributes);
                if !node.parent_groups.is_empty() {
                    existing.parent_groups = node.parent_groups;
                }
                if node.logic.is_some() {
                    existing.logic = node.logic;
                }
                self.order.retain(|n| n != old);
            }
            None => {
                if let Some(slot) = self.order.iter_mut().find(|n| n.as_str() == old) {
                    *slot = new.to_string();
                }
                self.nodes.insert(new.to_string(), node);
                self.adjacency.insert(new.to_string(), Adjacency::default());
            }
        }

        let relabel = |end: String| if end == old { new.to_string() } else { end };
        for (id, attrs) in moved {
            let id = EdgeId { source: relabel(id.source), target: relabel(id.target), key: id.key };
            self.upsert_edge(id, attrs);
        }
        Ok(())
    }

    // ========================================================================
    // Edge CRUD
    // ========================================================================

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains_key(id)
    }

    fn get_edge(&self, id: &EdgeId) -> Option<Edge> {
        self.edges.get(id).map(|attrs| Edge::new(id.clone(), attrs.clone()))
    }

    fn all_edges(&self) -> Vec<Edge> {
        self.order
            .iter()
            .filter_map(|id| self.adjacency.get(id))
            .flat_map(|adj| adj.outgoing.iter())
            .filter_map(|id| self.get_edge(id))
            .collect()
    }

    fn add_edge(&mut self, src: &str, dst: &str, attrs: AttributeMap) -> EdgeKey {
        let mut k = 0i64;
        while self.edges.contains_key(&EdgeId::new(src, dst, k)) {
            k += 1;
        }
        let key = EdgeKey::Int(k);
        self.upsert_edge(EdgeId::new(src, dst, key.clone()), attrs);
        key
    }

    fn upsert_edge(&mut self, id: EdgeId, attrs: AttributeMap) -> bool {
        if let Some(existing) = self.edges.get_mut(&id) {
            merge_attributes(existing, attrs);
            return false;
        }

        self.ensure_node(&id.source);
        self.ensure_node(&id.target);

        // Update adjacency for both endpoints
        if let Some(adj) = self.adjacency.get_mut(&id.source) {
            adj.outgoing.push(id.clone());
        }
        if let Some(adj) = self.adjacency.get_mut(&id.target) {
            adj.incoming.push(id.clone());
        }
        self.edges.insert(id, attrs);
        true
    }

    fn remove_edge(&mut self, id: &EdgeId) -> bool {
        let removed = self.edges.remove(id).is_some();
        if removed {
            if let Some(adj) = self.adjacency.get_mut(&id.source) {
                adj.outgoing.retain(|e| e != id);
            }
            if let Some(adj) = self.adjacency.get_mut(&id.target) {
                adj.incoming.retain(|e| e != id);
            }
        }
        removed
    }

    // ========================================================================
    // Adjacency
    // ========================================================================

    fn edges_of(&self, node: &str, dir: Direction) -> Vec<Edge> {
        let Some(adj) = self.adjacency.get(node) else {
            return Vec::new();
        };
        let ids = match dir {
            Direction::Outgoing => adj.outgoing.clone(),
            Direction::Incoming => adj.incoming.clone(),
            Direction::Both => self.incident_edges(node),
        };
        ids.iter().filter_map(|id| self.get_edge(id)).collect()
    }

    fn successors(&self, node: &str) -> Vec<String> {
        match self.adjacency.get(node) {
            Some(adj) => Self::distinct(adj.outgoing.iter().map(|e| &e.target)),
            None => Vec::new(),
        }
    }

    fn predecessors(&self, node: &str) -> Vec<String> {
        match self.adjacency.get(node) {
            Some(adj) => Self::distinct(adj.incoming.iter().map(|e| &e.source)),
            None => Vec::new(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
