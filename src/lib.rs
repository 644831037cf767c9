//! # techgraph: Prerequisite Multigraphs
//!
//! A tech graph is a directed multigraph in which an edge `a → b` means "`a`
//! is needed to make `b`". Nodes can carry an ordered list of *parent groups*
//! that say which prerequisites substitute for each other and which are
//! optional; the deriver turns those declarations into annotated edges.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphStore` is the contract between the algorithms and storage
//! 2. **Copies out, mutators in**: reads return owned copies; writes go through declared methods
//! 3. **Explicit state**: the color source is created per derivation pass, never global
//!
//! ## Quick Start
//!
//! ```rust
//! use techgraph::{TechGraph, ParentGroup, attributes};
//!
//! # fn main() -> techgraph::Result<()> {
//! let mut graph = TechGraph::new();
//! graph.add_edge("unsalted butter", "basic pancakes", attributes([("quantity", "2 tbsp")]));
//! graph.add_edge("vegetable oil", "basic pancakes", attributes([("quantity", "1 tbsp")]));
//! graph.set_parent_groups(
//!     "basic pancakes",
//!     vec![ParentGroup::any_of(["unsalted butter", "vegetable oil"])],
//! );
//!
//! let derivation = graph.derive_edge_attributes()?;
//! assert_eq!(derivation.edges.len(), 2);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod key;
pub mod normalize;
pub mod derive;
pub mod neighborhood;
pub mod export;
pub mod describe;
pub mod render;
pub mod hash;
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    AttributeMap, Direction, Edge, EdgeId, EdgeKey, Logic, Node, NodeInfo,
    ParentGroup, Value, attributes,
};
pub use storage::{GraphStore, MemoryStore};
pub use derive::{ColorSource, Derivation, Rgb};
pub use config::RenderConfig;
pub use hash::HashAlgorithm;

// ============================================================================
// Top-level TechGraph handle
// ============================================================================

/// The primary entry point. A `TechGraph` wraps a store and exposes the
/// tech-graph operations on top of it.
#[derive(Debug, Clone, Default)]
pub struct TechGraph<S: GraphStore = MemoryStore> {
    store: S,
}

impl TechGraph<MemoryStore> {
    /// Empty in-memory graph.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl<S: GraphStore> TechGraph<S> {
    /// Create a TechGraph over the given store.
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ========================================================================
    // Building
    // ========================================================================

    pub fn add_node(&mut self, id: &str, attrs: AttributeMap) -> bool {
        self.store.add_node(id, attrs)
    }

    pub fn add_edge(&mut self, src: &str, dst: &str, attrs: AttributeMap) -> EdgeKey {
        self.store.add_edge(src, dst, attrs)
    }

    pub fn get_node(&self, id: &str) -> Option<Node> {
        self.store.get_node(id)
    }

    pub fn get_edge(&self, id: &EdgeId) -> Option<Edge> {
        self.store.get_edge(id)
    }

    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// Replace a node's parent groups, creating the node if needed.
    pub fn set_parent_groups(&mut self, node: &str, groups: Vec<ParentGroup>) {
        let mut current = self.store.get_node(node).unwrap_or_else(|| Node::new(node));
        current.parent_groups = groups;
        self.store.put_node(current);
    }

    /// Set a node's all/any flag, creating the node if needed.
    pub fn set_logic(&mut self, node: &str, logic: Logic) {
        let mut current = self.store.get_node(node).unwrap_or_else(|| Node::new(node));
        current.logic = Some(logic);
        self.store.put_node(current);
    }

    // ========================================================================
    // Node info
    // ========================================================================

    /// Detached copy of a node plus its direct parents and children.
    pub fn node_info(&self, node: &str) -> Result<NodeInfo> {
        let current = self.store.get_node(node)
            .ok_or_else(|| Error::NotFound(format!("Node {node}")))?;
        Ok(NodeInfo {
            parents: self.store.predecessors(node),
            children: self.store.successors(node),
            name: current.id,
            attributes: current.attributes,
            parent_groups: current.parent_groups,
            logic: current.logic,
        })
    }

    /// Write an edited [`NodeInfo`] back.
    ///
    /// Parents and children not yet connected get a new edge; existing edges
    /// are left alone. The node's attributes, groups and flag are replaced.
    pub fn apply_node_info(&mut self, info: NodeInfo) {
        let parents = self.store.predecessors(&info.name);
        for parent in info.parents.iter().filter(|p| !parents.contains(*p)) {
            self.store.add_edge(parent, &info.name, AttributeMap::new());
        }
        let children = self.store.successors(&info.name);
        for child in info.children.iter().filter(|c| !children.contains(*c)) {
            self.store.add_edge(&info.name, child, AttributeMap::new());
        }
        self.store.put_node(Node {
            id: info.name,
            attributes: info.attributes,
            parent_groups: info.parent_groups,
            logic: info.logic,
        });
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Materialize every node's parent groups as edge attributes.
    /// See [`derive::derive_edge_attributes`].
    pub fn derive_edge_attributes(&mut self) -> Result<Derivation> {
        derive::derive_edge_attributes(&mut self.store, &mut ColorSource::new())
    }

    /// Title-case every node and every group reference.
    /// See [`normalize::normalize_graph`].
    pub fn normalize_names(&mut self) -> Result<()> {
        normalize::normalize_graph(&mut self.store)
    }

    /// Edges near `source`, alternating forward and backward BFS.
    pub fn nearby_edges(&self, source: &str, count: usize) -> Result<Vec<(String, String)>> {
        neighborhood::nearby_edges(&self.store, source, count)
    }

    /// Induced subgraph over at most `count` nodes near `source`.
    pub fn nearby_subgraph(&self, source: &str, count: usize) -> Result<TechGraph> {
        neighborhood::nearby_subgraph(&self.store, source, count)
    }

    /// Human-readable sentence about what `node` requires.
    pub fn description(&self, node: &str) -> Result<String> {
        describe::describe(&self.store, node)
    }

    /// Exchange-blob JSON.
    pub fn to_json(&self) -> Result<String> {
        export::export(&self.store)
    }

    /// Graphviz DOT text.
    pub fn to_dot(&self) -> String {
        render::to_dot(&self.store)
    }

    /// SVG bytes from the external layout tool.
    pub fn to_svg(&self) -> Result<Vec<u8>> {
        render::render(&self.store)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Format error: {0}")]
    Format(String),

    #[error("Node {node:?} has no {attribute:?} attribute")]
    MissingAttribute { node: String, attribute: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Type error: expected {expected}, got {got}")]
    TypeError { expected: String, got: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
