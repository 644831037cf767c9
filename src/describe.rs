//! Plain-language description of what a node requires.

use crate::storage::GraphStore;
use crate::{Error, Result};

/// Sentence listing a node's direct parents.
///
/// ```text
/// To create Cooking, all of the following are required: Edible Matter, Heat Source
/// ```
///
/// Parents are listed in store order. Fails with
/// [`Error::MissingAttribute`] when the node has no `all_parents` flag.
pub fn describe<S: GraphStore>(store: &S, node: &str) -> Result<String> {
    let current = store.get_node(node).ok_or_else(|| Error::NotFound(format!("Node {node}")))?;
    let logic = current.logic.ok_or_else(|| Error::MissingAttribute {
        node: node.to_string(),
        attribute: "all_parents".to_string(),
    })?;
    let predecessors = store.predecessors(node).join(", ");

    Ok(format!("To create {node}, {logic} of the following are required: {predecessors}"))
}
