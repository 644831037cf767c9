//! DOT output and the external renderer.
//!
//! The renderer tests stand in small shell scripts for Graphviz so they run
//! without it installed.

use std::time::Duration;

use techgraph::render::{render_with, to_dot};
use techgraph::{Error, ParentGroup, RenderConfig, TechGraph, attributes};

fn graph() -> TechGraph {
    let mut graph = TechGraph::new();
    graph.add_edge("say \"cheese\"", "pizza", attributes([("quantity", "200 g")]));
    graph.add_edge("tomato", "pizza", attributes([("quantity", "3")]));
    graph.set_parent_groups("pizza", vec![ParentGroup::any_of(["say \"cheese\"", "tomato"])]);
    graph
}

#[test]
fn test_dot_after_derivation() {
    let mut graph = graph();
    graph.derive_edge_attributes().unwrap();

    let dot = graph.to_dot();

    assert_eq!(dot, to_dot(graph.store()));
    assert!(dot.contains(r##""say \"cheese\"" -> "pizza" ["key"="0", "color"="#ff0000""##));
    assert!(dot.contains(r#""optional"="false""#));
    assert!(dot.contains(r#""substitutes"="[\"say \\\"cheese\\\"\",\"tomato\"]""#));
    assert!(dot.ends_with("}\n"));
}

#[cfg(unix)]
#[test]
fn test_render_with_stand_in_programs() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = |name: &str, body: &str| {
        let path = dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    };
    let echo = script("echo-dot", "cat");
    let failing = script("failing-dot", "echo \"bad layout\" >&2\nexit 3");
    let slow = script("slow-dot", "exec sleep 5");
    let graph = graph();

    let output = render_with(graph.store(), &RenderConfig::default().with_program(&echo)).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), graph.to_dot());

    match render_with(graph.store(), &RenderConfig::default().with_program(&failing)) {
        Err(Error::Render(message)) => assert!(message.contains("bad layout"), "{message}"),
        other => panic!("expected render error, got {other:?}"),
    }

    let config = RenderConfig::default()
        .with_program(&slow)
        .with_timeout(Duration::from_millis(200));
    assert!(matches!(render_with(graph.store(), &config), Err(Error::Render(_))));

    let missing = RenderConfig::default().with_program(dir.path().join("no-such-dot"));
    assert!(matches!(render_with(graph.store(), &missing), Err(Error::Render(_))));
}
