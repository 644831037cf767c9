//! # Neighborhood BFS
//!
//! Local views around a node. A tech graph of any size is unreadable as a
//! whole, so exploration starts from one item and grows outwards in both
//! directions: what it is made from and what it is used for.
//!
//! ```text
//! forward  BFS:  f1    f2    f3 ...
//! backward BFS:     b1    b2    b3 ...
//! emitted:       f1 b1 f2 b2 f3 b3 ...   (until `count` or both exhausted)
//! ```

use std::collections::VecDeque;

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::model::Direction;
use crate::storage::{GraphStore, MemoryStore};
use crate::{Error, Result, TechGraph};

// ============================================================================
// BFS edge iterator
// ============================================================================

/// Lazy breadth-first tree-edge enumeration.
///
/// Every node reachable from the source is reported once, through the edge
/// that discovered it, as `(from, discovered)` in traversal orientation. For
/// `Direction::Incoming` that means the pair is the reverse of the stored
/// edge.
pub struct BfsEdges<'g, S: GraphStore> {
    store: &'g S,
    direction: Direction,
    visited: HashSet<String>,
    /// Frontier: node plus the neighbors not yet examined.
    queue: VecDeque<(String, std::vec::IntoIter<String>)>,
}

impl<'g, S: GraphStore> BfsEdges<'g, S> {
    pub fn new(store: &'g S, source: &str, direction: Direction) -> Result<Self> {
        if !store.contains_node(source) {
            return Err(Error::NotFound(format!("Node {source}")));
        }
        let mut visited = HashSet::new();
        visited.insert(source.to_string());
        let mut queue = VecDeque::new();
        queue.push_back((source.to_string(), store.neighbors(source, direction).into_iter()));
        Ok(Self { store, direction, visited, queue })
    }
}

impl<S: GraphStore> Iterator for BfsEdges<'_, S> {
    type Item = (String, String);

    fn next(&mut self) -> Option<(String, String)> {
        while let Some((parent, children)) = self.queue.front_mut() {
            match children.next() {
                Some(child) => {
                    if !self.visited.insert(child.clone()) {
                        continue;
                    }
                    let parent = parent.clone();
                    let grandchildren = self.store.neighbors(&child, self.direction);
                    self.queue.push_back((child.clone(), grandchildren.into_iter()));
                    return Some((parent, child));
                }
                None => {
                    self.queue.pop_front();
                }
            }
        }
        None
    }
}

// ============================================================================
// Nearby edges / subgraph
// ============================================================================

/// Lazy alternation of forward and backward BFS around one node.
///
/// Yields a forward edge, then a backward edge, and so on; once one side is
/// exhausted the other drains alone. Backward edges are reported in their
/// stored orientation.
pub struct NearbyEdges<'g, S: GraphStore> {
    forward: BfsEdges<'g, S>,
    backward: BfsEdges<'g, S>,
    forward_turn: bool,
}

impl<'g, S: GraphStore> NearbyEdges<'g, S> {
    pub fn new(store: &'g S, source: &str) -> Result<Self> {
        Ok(Self {
            forward: BfsEdges::new(store, source, Direction::Outgoing)?,
            backward: BfsEdges::new(store, source, Direction::Incoming)?,
            forward_turn: true,
        })
    }
}

impl<S: GraphStore> Iterator for NearbyEdges<'_, S> {
    type Item = (String, String);

    fn next(&mut self) -> Option<(String, String)> {
        for _ in 0..2 {
            let forward = self.forward_turn;
            self.forward_turn = !forward;
            let edge = if forward {
                self.forward.next()
            } else {
                self.backward.next().map(|(u, v)| (v, u))
            };
            if edge.is_some() {
                return edge;
            }
        }
        None
    }
}

/// Up to `count` edges around `source`, alternating forward and backward BFS.
///
/// The first edge, if any, is a forward edge out of `source` (or, when
/// `source` has no successors, a backward edge into it). No deduplication is
/// done: an edge found from both sides appears twice.
pub fn nearby_edges<S: GraphStore>(store: &S, source: &str, count: usize) -> Result<Vec<(String, String)>> {
    let edges: Vec<_> = NearbyEdges::new(store, source)?.take(count).collect();
    trace!(source, count, found = edges.len(), "nearby edges");
    Ok(edges)
}

/// Induced subgraph over at most `count` nodes near `source`.
///
/// Edges are pulled from [`NearbyEdges`] until `count` distinct endpoints
/// have been seen or both directions are exhausted, so `count` bounds nodes
/// rather than edges. The result holds copies of those nodes and every edge
/// of the source graph between them, whether or not BFS emitted it.
pub fn nearby_subgraph<S: GraphStore>(store: &S, source: &str, count: usize) -> Result<TechGraph> {
    let mut seen = HashSet::new();
    let mut nodes: Vec<String> = Vec::new();
    for (u, v) in NearbyEdges::new(store, source)? {
        for id in [u, v] {
            if nodes.len() < count && seen.insert(id.clone()) {
                nodes.push(id);
            }
        }
        if nodes.len() >= count {
            break;
        }
    }

    let subgraph = induced_subgraph(store, &nodes);
    debug!(
        source,
        nodes = subgraph.node_count(),
        edges = subgraph.edge_count(),
        "extracted nearby subgraph"
    );
    Ok(subgraph)
}

/// Copy of the nodes in `ids` and all edges among them, with full attributes.
/// Unknown ids are ignored.
pub fn induced_subgraph<S: GraphStore>(store: &S, ids: &[String]) -> TechGraph {
    let keep: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let mut sub = MemoryStore::new();

    for node in store.all_nodes().into_iter().filter(|n| keep.contains(n.id.as_str())) {
        sub.put_node(node);
    }
    for edge in store.all_edges() {
        if keep.contains(edge.source.as_str()) && keep.contains(edge.target.as_str()) {
            sub.upsert_edge(edge.id(), edge.attributes);
        }
    }

    TechGraph::with_store(sub)
}

// ============================================================================
// Tests
// ============================================================================
