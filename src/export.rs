//! JSON exchange blob: serialize a graph and read it back.
//!
//! One canonical layout, node and edge lists tagged with a class marker:
//!
//! ```text
//! {"class": "TechGraph",
//!  "nodes": [{"id": ..., "attributes": {...}, "parent_groups": [...], "all_parents": true}],
//!  "edges": [{"source": ..., "target": ..., "key": 0, "attributes": {...}}]}
//! ```
//!
//! `parent_groups` and `all_parents` are omitted when a node has none. Edge
//! keys keep their JSON type, so `1` and `"1"` stay distinct edges.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Edge, Node};
use crate::storage::{GraphStore, MemoryStore};
use crate::{Error, Result, TechGraph};

/// Class marker written to, and required in, every blob.
pub const CLASS_NAME: &str = "TechGraph";

#[derive(Debug, Serialize, Deserialize)]
struct Blob {
    class: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Blob {
    fn from_store<S: GraphStore>(store: &S) -> Self {
        Self {
            class: CLASS_NAME.to_string(),
            nodes: store.all_nodes(),
            edges: store.all_edges(),
        }
    }
}

// ============================================================================
// Export
// ============================================================================

/// Serialize the whole graph as a compact JSON blob.
pub fn export<S: GraphStore>(store: &S) -> Result<String> {
    serde_json::to_string(&Blob::from_store(store))
        .map_err(|e| Error::Format(format!("cannot encode graph: {e}")))
}

/// Write the blob, pretty-printed, to `writer`.
pub fn export_to_writer<S: GraphStore>(store: &S, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &Blob::from_store(store))
        .map_err(|e| Error::Format(format!("cannot encode graph: {e}")))?;
    writeln!(writer)?;
    Ok(())
}

// ============================================================================
// Import
// ============================================================================

/// Rebuild a graph from a blob produced by [`export`].
///
/// Fails with [`Error::Format`] when the text is not JSON, a top-level field
/// is missing, the class marker is wrong, or a record is malformed.
pub fn import(text: &str) -> Result<TechGraph> {
    let blob: Blob = serde_json::from_str(text)
        .map_err(|e| Error::Format(format!("invalid graph blob: {e}")))?;
    if blob.class != CLASS_NAME {
        return Err(Error::Format(format!(
            "expected class {CLASS_NAME:?}, found {:?}",
            blob.class
        )));
    }

    let mut store = MemoryStore::new();
    for node in blob.nodes {
        store.put_node(node);
    }
    for edge in blob.edges {
        let id = edge.id();
        store.upsert_edge(id, edge.attributes);
    }

    debug!(nodes = store.node_count(), edges = store.edge_count(), "imported graph blob");
    Ok(TechGraph::with_store(store))
}

// ============================================================================
// Loading
// ============================================================================

/// Where [`load`] reads a blob from.
pub enum GraphSource {
    Path(PathBuf),
    Reader(Box<dyn Read>),
}

impl From<PathBuf> for GraphSource {
    fn from(path: PathBuf) -> Self { GraphSource::Path(path) }
}

impl From<&Path> for GraphSource {
    fn from(path: &Path) -> Self { GraphSource::Path(path.to_path_buf()) }
}

impl From<Box<dyn Read>> for GraphSource {
    fn from(reader: Box<dyn Read>) -> Self { GraphSource::Reader(reader) }
}

/// Read and [`import`] a blob from a file or stream.
///
/// A path that exists but is not a regular file is rejected with
/// [`Error::InvalidInput`].
pub fn load(source: impl Into<GraphSource>) -> Result<TechGraph> {
    let text = match source.into() {
        GraphSource::Path(path) => {
            if path.exists() && !path.is_file() {
                return Err(Error::InvalidInput(format!("{} is not a file", path.display())));
            }
            fs::read_to_string(&path)?
        }
        GraphSource::Reader(mut reader) => {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            text
        }
    };
    import(&text)
}
