//! # Graph Store Trait
//!
//! The contract between the tech-graph algorithms and whatever holds the
//! nodes and edges. Everything above this layer (deriver, BFS, serializer,
//! renderer) talks to a `GraphStore`, never to a concrete map.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | Insertion-ordered in-memory multigraph |
//!
//! ## Ownership
//!
//! Reads hand out copies (`get_node`, `get_edge`, `all_nodes`, ...). The only
//! way to change what the store holds is one of the declared mutators, which
//! all take `&mut self`.

pub mod memory;

use crate::model::*;
use crate::Result;

pub use memory::MemoryStore;

// ============================================================================
// GraphStore Trait
// ============================================================================

/// Directed multigraph keyed by string node identifiers.
///
/// Parallel edges between the same ordered pair are told apart by an
/// [`EdgeKey`]. Iteration order is the store's insertion order; callers that
/// need a different order sort for themselves.
pub trait GraphStore {
    // ========================================================================
    // Node CRUD
    // ========================================================================

    /// Total number of nodes.
    fn node_count(&self) -> usize;

    fn contains_node(&self, id: &str) -> bool;

    /// All node identifiers, in insertion order.
    fn node_ids(&self) -> Vec<String>;

    /// Copy of a node. Returns None if not found.
    fn get_node(&self, id: &str) -> Option<Node>;

    /// Copies of all nodes, in insertion order.
    fn all_nodes(&self) -> Vec<Node> {
        self.node_ids().iter().filter_map(|id| self.get_node(id)).collect()
    }

    /// Create the node if absent, then merge `attrs` into its attributes.
    /// Returns true if the node was created.
    fn add_node(&mut self, id: &str, attrs: AttributeMap) -> bool;

    /// Insert or fully replace a node (attributes, groups and logic flag).
    /// Edges are untouched.
    fn put_node(&mut self, node: Node);

    /// Set one attribute on an existing node.
    fn set_node_attribute(&mut self, id: &str, key: &str, val: Value) -> Result<()>;

    /// Remove one attribute from an existing node.
    fn remove_node_attribute(&mut self, id: &str, key: &str) -> Result<()>;

    /// Delete a node together with every incident edge. Returns true if it existed.
    fn remove_node(&mut self, id: &str) -> bool;

    /// Rename a node, carrying its attributes and incident edges along.
    ///
    /// If `new` already exists the two nodes merge: attributes of `old` win on
    /// conflicting keys and parallel edges landing on the same key merge their
    /// attributes.
    fn rename_node(&mut self, old: &str, new: &str) -> Result<()>;

    // ========================================================================
    // Edge CRUD
    // ========================================================================

    /// Total number of edges.
    fn edge_count(&self) -> usize;

    fn contains_edge(&self, id: &EdgeId) -> bool;

    /// Copy of an edge. Returns None if not found.
    fn get_edge(&self, id: &EdgeId) -> Option<Edge>;

    /// Copies of all edges, grouped by source in node order.
    fn all_edges(&self) -> Vec<Edge>;

    /// Add a new parallel edge with the lowest unused integer key.
    /// Missing endpoints are created.
    fn add_edge(&mut self, src: &str, dst: &str, attrs: AttributeMap) -> EdgeKey;

    /// Create the edge if absent, else merge `attrs` into its attributes.
    /// Missing endpoints are created. Returns true if the edge was created.
    fn upsert_edge(&mut self, id: EdgeId, attrs: AttributeMap) -> bool;

    /// Delete an edge. Returns true if it existed.
    fn remove_edge(&mut self, id: &EdgeId) -> bool;

    // ========================================================================
    // Adjacency
    // ========================================================================

    /// Edges incident on `node` in the given direction. Self-loops are
    /// reported once for `Direction::Both`.
    fn edges_of(&self, node: &str, dir: Direction) -> Vec<Edge>;

    /// Distinct targets of outgoing edges, in first-edge order.
    fn successors(&self, node: &str) -> Vec<String>;

    /// Distinct sources of incoming edges, in first-edge order.
    fn predecessors(&self, node: &str) -> Vec<String>;

    /// Successors for `Outgoing`, predecessors for `Incoming`, both
    /// (successors first, deduplicated) for `Both`.
    fn neighbors(&self, node: &str, dir: Direction) -> Vec<String> {
        match dir {
            Direction::Outgoing => self.successors(node),
            Direction::Incoming => self.predecessors(node),
            Direction::Both => {
                let mut all = self.successors(node);
                for p in self.predecessors(node) {
                    if !all.contains(&p) {
                        all.push(p);
                    }
                }
                all
            }
        }
    }
}
