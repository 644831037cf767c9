//! Node info editing, descriptions and hashing through the public API.

use pretty_assertions::assert_eq;
use techgraph::hash::{hash_attributes, hash_value};
use techgraph::{AttributeMap, Error, HashAlgorithm, Logic, ParentGroup, TechGraph, Value, attributes};

fn cooking() -> TechGraph {
    let mut graph = TechGraph::new();
    graph.add_edge("Heat Source", "Cooking", AttributeMap::new());
    graph.add_edge("Edible Matter", "Cooking", AttributeMap::new());
    graph.add_edge("Cooking", "Bread", AttributeMap::new());
    graph.add_node("Cooking", attributes([("era", "stone age")]));
    graph
}

#[test]
fn test_node_info_is_a_detached_copy() {
    let graph = cooking();

    let mut info = graph.node_info("Cooking").unwrap();
    assert_eq!(info.name, "Cooking");
    assert_eq!(info.parents, vec!["Heat Source", "Edible Matter"]);
    assert_eq!(info.children, vec!["Bread"]);
    assert_eq!(info.attributes.get("era"), Some(&Value::from("stone age")));

    info.attributes.insert("era".into(), Value::from("bronze age"));
    assert_eq!(
        graph.get_node("Cooking").unwrap().attributes.get("era"),
        Some(&Value::from("stone age"))
    );
}

#[test]
fn test_apply_node_info_adds_missing_edges_only() {
    let mut graph = cooking();
    let mut info = graph.node_info("Cooking").unwrap();
    info.parents.push("Water".into());
    info.children.push("Stew".into());
    info.parent_groups = vec![ParentGroup::any_of(["Heat Source", "Water"])];
    info.logic = Some(Logic::All);
    info.attributes = attributes([("era", "neolithic")]);

    graph.apply_node_info(info);

    assert_eq!(graph.edge_count(), 5);
    let updated = graph.node_info("Cooking").unwrap();
    assert_eq!(updated.parents, vec!["Heat Source", "Edible Matter", "Water"]);
    assert_eq!(updated.children, vec!["Bread", "Stew"]);
    assert_eq!(updated.logic, Some(Logic::All));
    assert_eq!(updated.attributes, attributes([("era", "neolithic")]));
    assert_eq!(updated.parent_groups.len(), 1);
}

#[test]
fn test_describe_through_graph() {
    let mut graph = cooking();
    assert!(matches!(
        graph.description("Cooking"),
        Err(Error::MissingAttribute { .. })
    ));

    graph.set_logic("Cooking", Logic::All);
    assert_eq!(
        graph.description("Cooking").unwrap(),
        "To create Cooking, all of the following are required: Heat Source, Edible Matter"
    );
    assert!(matches!(graph.description("Fusion"), Err(Error::NotFound(_))));
}

#[test]
fn test_attribute_hash_ignores_list_order() {
    let a = attributes([
        ("tags", Value::from(vec!["fire", "heat", "food"])),
        ("era", Value::from("stone age")),
    ]);
    let b = attributes([
        ("era", Value::from("stone age")),
        ("tags", Value::from(vec!["food", "fire", "heat"])),
    ]);

    let digest = hash_attributes(&a, HashAlgorithm::Sha256).unwrap();
    assert_eq!(digest, hash_attributes(&b, HashAlgorithm::Sha256).unwrap());
    assert_eq!(digest, hash_value(&Value::Map(a.clone()), HashAlgorithm::default()).unwrap());
    assert_eq!(a.get("tags"), Some(&Value::from(vec!["fire", "heat", "food"])));
}
