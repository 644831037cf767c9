//! Name normalization.
//!
//! Node names arrive from hand-written recipes and tech lists, so the same
//! item shows up as `"milk"`, `" Milk"` and `"MILK "`. Normalizing collapses
//! whitespace and title-cases every word; `normalize_graph` applies that to
//! every node and to every reference inside `parent_groups`.

use tracing::debug;

use crate::key::KeyCodec;
use crate::model::ParentGroup;
use crate::storage::GraphStore;
use crate::Result;

/// Collapse whitespace runs, trim, and title-case.
///
/// A letter is uppercased when the character before it is not a letter and
/// lowercased otherwise, so hyphens and apostrophes start new words:
/// `"all-purpose  FLOUR"` becomes `"All-Purpose Flour"`.
pub fn normalize(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = String::with_capacity(collapsed.len());
    let mut prev_cased = false;
    for c in collapsed.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && prev_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

/// Normalize the base part of a compound identifier, keeping its key.
fn normalize_member(codec: &KeyCodec, member: &str) -> Result<String> {
    let (base, key) = codec.split(member)?;
    Ok(codec.format(&normalize(&base), &key))
}

/// Normalize every base name referenced by a group.
pub fn normalize_group(codec: &KeyCodec, group: &ParentGroup) -> Result<ParentGroup> {
    Ok(match group {
        ParentGroup::Required(member) => ParentGroup::Required(normalize_member(codec, member)?),
        ParentGroup::Alternatives(members) => ParentGroup::Alternatives(
            members
                .iter()
                .map(|m| m.as_deref().map(|m| normalize_member(codec, m)).transpose())
                .collect::<Result<_>>()?,
        ),
    })
}

/// Rename every node to its normalized form and rewrite group references.
///
/// Nodes whose names normalize to the same string merge, and the renamed
/// node's groups replace those of the node it lands on. Group members are
/// rewritten through the key codec, so a bare `"maple syrup"` becomes
/// `"Maple Syrup:0"`. Every group is validated before anything is renamed;
/// a malformed member leaves the graph untouched.
pub fn normalize_graph<S: GraphStore>(store: &mut S) -> Result<()> {
    let codec = KeyCodec::default();

    for node in store.all_nodes() {
        for group in &node.parent_groups {
            normalize_group(&codec, group)?;
        }
    }

    let mut renamed = 0usize;
    for id in store.node_ids() {
        let name = normalize(&id);
        if name != id {
            store.rename_node(&id, &name)?;
            renamed += 1;
        }
    }

    // Read groups back after renaming: a merged node holds the groups of the
    // node that was renamed into it.
    for mut node in store.all_nodes() {
        if !node.has_parent_groups() {
            continue;
        }
        node.parent_groups = node
            .parent_groups
            .iter()
            .map(|g| normalize_group(&codec, g))
            .collect::<Result<Vec<_>>>()?;
        store.put_node(node);
    }

    debug!(renamed, nodes = store.node_count(), "normalized node names");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeMap, EdgeId, Node};
    use crate::storage::MemoryStore;

    #[test]
    fn test_normalize_whitespace_and_case() {
        assert_eq!(normalize("  basic   pancakes "), "Basic Pancakes");
        assert_eq!(normalize("UNSALTED\tbutter"), "Unsalted Butter");
        assert_eq!(normalize("all-purpose flour"), "All-Purpose Flour");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_case_independent() {
        assert_eq!(normalize("mAPLE sYRUP"), normalize("maple syrup"));
    }

    #[test]
    fn test_normalize_graph_renames_and_rewrites_groups() {
        let mut store = MemoryStore::new();
        store.add_edge("vegetable oil", "basic pancakes", AttributeMap::new());
        store.add_edge("vegetable oil", "basic pancakes", AttributeMap::new());
        let mut node = store.get_node("basic pancakes").unwrap();
        node.parent_groups = vec![
            ParentGroup::Required("milk".into()),
            ParentGroup::any_of(["unsalted butter", "vegetable  oil:1"]),
            ParentGroup::optional(["maple syrup"]),
        ];
        store.put_node(node);

        normalize_graph(&mut store).unwrap();

        assert!(store.contains_edge(&EdgeId::new("Vegetable Oil", "Basic Pancakes", 1)));
        let node = store.get_node("Basic Pancakes").unwrap();
        assert_eq!(
            node.parent_groups,
            vec![
                ParentGroup::Required("Milk:0".into()),
                ParentGroup::any_of(["Unsalted Butter:0", "Vegetable Oil:1"]),
                ParentGroup::optional(["Maple Syrup:0"]),
            ]
        );
    }

    #[test]
    fn test_normalize_graph_bad_member_leaves_graph_untouched() {
        let mut store = MemoryStore::new();
        store.add_edge("a", "b", AttributeMap::new());
        let mut node = store.get_node("b").unwrap();
        node.parent_groups = vec![ParentGroup::any_of(["x:y:z"])];
        store.put_node(node);

        assert!(normalize_graph(&mut store).is_err());
        assert_eq!(store.node_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_merged_node_keeps_groups_of_renamed_node() {
        let mut store = MemoryStore::new();
        store.put_node(Node::new("cake").with_parent_groups([ParentGroup::Required("flour".into())]));
        store.put_node(Node::new("Cake").with_parent_groups([ParentGroup::Required("eggs".into())]));

        normalize_graph(&mut store).unwrap();

        assert_eq!(store.node_ids(), vec!["Cake"]);
        assert_eq!(
            store.get_node("Cake").unwrap().parent_groups,
            vec![ParentGroup::Required("Flour:0".into())]
        );
    }
}
