//! End-to-end derivation over the pancake recipe graph.
//!
//! Builds the graph through the public `TechGraph` API, derives edge
//! attributes, and checks the resulting edges, with and without name
//! normalization first.

use pretty_assertions::assert_eq;
use techgraph::{EdgeId, ParentGroup, TechGraph, Value, attributes};

fn pancakes() -> TechGraph {
    let mut graph = TechGraph::new();
    graph.add_edge("unsalted butter", "basic pancakes", attributes([("quantity", "2 tbsp")]));
    graph.add_edge("vegetable oil", "basic pancakes", attributes([("quantity", "1 tbsp")]));
    graph.set_parent_groups(
        "basic pancakes",
        vec![
            ParentGroup::any_of(["unsalted butter", "vegetable oil:1"]),
            ParentGroup::Alternatives(vec![None, Some("Maple Syrup".to_string())]),
        ],
    );
    graph
}

fn attr(graph: &TechGraph, id: &EdgeId, name: &str) -> Option<Value> {
    graph.get_edge(id).and_then(|e| e.attributes.get(name).cloned())
}

// ============================================================================
// 1. Derivation on the raw names
// ============================================================================

#[test]
fn test_pancake_derivation() {
    let mut graph = pancakes();

    let derivation = graph.derive_edge_attributes().unwrap();
    assert_eq!(derivation.groups, 2);
    assert_eq!(derivation.edges.len(), 3);

    let butter = EdgeId::new("unsalted butter", "basic pancakes", 0);
    let oil = EdgeId::new("vegetable oil", "basic pancakes", 1);
    let syrup = EdgeId::new("Maple Syrup", "basic pancakes", 0);

    for id in [&butter, &oil] {
        assert_eq!(attr(&graph, id, "optional"), Some(Value::Bool(false)));
        assert_eq!(attr(&graph, id, "group_id"), Some(Value::from("basic pancakes|0")));
        assert_eq!(
            attr(&graph, id, "substitutes"),
            Some(Value::from(vec!["unsalted butter", "vegetable oil:1"]))
        );
        assert_eq!(attr(&graph, id, "style"), None);
    }
    assert_eq!(attr(&graph, &butter, "color"), attr(&graph, &oil, "color"));
    assert!(attr(&graph, &butter, "color").is_some());

    assert_eq!(attr(&graph, &syrup, "optional"), Some(Value::Bool(true)));
    assert_eq!(attr(&graph, &syrup, "group_id"), Some(Value::from("basic pancakes|1")));
    assert_eq!(attr(&graph, &syrup, "style"), Some(Value::from("dotted")));
    assert_eq!(attr(&graph, &syrup, "color"), None);
    assert_eq!(attr(&graph, &syrup, "substitutes"), None);
}

#[test]
fn test_derivation_keeps_existing_attributes_and_adds_parallel_edge() {
    let mut graph = pancakes();
    graph.derive_edge_attributes().unwrap();

    // vegetable oil:1 is a second, parallel edge next to the existing key 0
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(
        attr(&graph, &EdgeId::new("vegetable oil", "basic pancakes", 0), "quantity"),
        Some(Value::from("1 tbsp"))
    );
    assert_eq!(
        attr(&graph, &EdgeId::new("vegetable oil", "basic pancakes", 0), "group_id"),
        None
    );
    assert_eq!(
        attr(&graph, &EdgeId::new("unsalted butter", "basic pancakes", 0), "quantity"),
        Some(Value::from("2 tbsp"))
    );
    assert!(graph.get_node("Maple Syrup").is_some());
}

#[test]
fn test_first_group_is_red() {
    let mut graph = pancakes();
    graph.derive_edge_attributes().unwrap();

    let color = attr(&graph, &EdgeId::new("unsalted butter", "basic pancakes", 0), "color");
    assert_eq!(color, Some(Value::from(vec![1.0, 0.0, 0.0])));
}

// ============================================================================
// 2. Normalize, then derive
// ============================================================================

#[test]
fn test_normalized_pancake_derivation() {
    let mut graph = pancakes();
    graph.normalize_names().unwrap();
    graph.derive_edge_attributes().unwrap();

    let butter = EdgeId::new("Unsalted Butter", "Basic Pancakes", 0);
    let oil = EdgeId::new("Vegetable Oil", "Basic Pancakes", 1);
    let syrup = EdgeId::new("Maple Syrup", "Basic Pancakes", 0);

    assert!(graph.get_node("basic pancakes").is_none());
    assert_eq!(attr(&graph, &butter, "group_id"), Some(Value::from("Basic Pancakes|0")));
    assert_eq!(
        attr(&graph, &oil, "substitutes"),
        Some(Value::from(vec!["Unsalted Butter:0", "Vegetable Oil:1"]))
    );
    assert_eq!(attr(&graph, &syrup, "group_id"), Some(Value::from("Basic Pancakes|1")));
    assert_eq!(attr(&graph, &syrup, "style"), Some(Value::from("dotted")));
}

// ============================================================================
// 3. Failure leaves the graph alone
// ============================================================================

#[test]
fn test_malformed_member_aborts_without_changes() {
    let mut graph = pancakes();
    graph.set_parent_groups(
        "waffles",
        vec![ParentGroup::any_of(["batter", "bad:member:key"])],
    );
    let before = graph.to_json().unwrap();

    assert!(graph.derive_edge_attributes().is_err());
    assert_eq!(graph.to_json().unwrap(), before);
}

#[test]
fn test_description_after_setting_logic() {
    let mut graph = pancakes();
    graph.set_logic("basic pancakes", techgraph::Logic::Any);

    assert_eq!(
        graph.description("basic pancakes").unwrap(),
        "To create basic pancakes, any of the following are required: unsalted butter, vegetable oil"
    );
}
