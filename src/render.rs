//! Graphviz rendering.
//!
//! The graph is written as DOT text and piped through an external layout
//! tool (`dot` by default); whatever the tool prints is the image.
//!
//! ```text
//! TechGraph → to_dot() → dot -Tsvg (stdin → stdout) → SVG bytes
//! ```
//!
//! Derived edge attributes (`color`, `style`) are valid Graphviz attributes,
//! so substitution groups and optional prerequisites show up without any
//! extra styling step.

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::derive::Rgb;
use crate::model::{AttributeMap, Value};
use crate::storage::GraphStore;
use crate::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

// ============================================================================
// DOT writer
// ============================================================================

/// Quote a DOT identifier or attribute value.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n"))
}

fn dot_value(name: &str, value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::List(_) if name == "color" => match Rgb::from_value(value) {
            Some(color) => color.to_hex(),
            None => value.to_string(),
        },
        Value::List(_) | Value::Map(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

fn dot_attributes(attrs: &AttributeMap, extra: Option<(&str, String)>) -> String {
    let mut names: Vec<&String> = attrs.keys().collect();
    names.sort();

    let mut parts: Vec<String> = extra
        .into_iter()
        .map(|(name, value)| format!("{}={}", quote(name), quote(&value)))
        .collect();
    parts.extend(
        names
            .into_iter()
            .map(|name| format!("{}={}", quote(name), quote(&dot_value(name, &attrs[name])))),
    );

    if parts.is_empty() {
        String::new()
    } else {
        format!(" [{}]", parts.join(", "))
    }
}

/// DOT text for the whole graph. Parallel edges are kept and carry their
/// key as a `key` attribute.
pub fn to_dot<S: GraphStore>(store: &S) -> String {
    let mut out = String::from("digraph {\n");
    for node in store.all_nodes() {
        out.push_str(&format!("    {}{};\n", quote(&node.id), dot_attributes(&node.attributes, None)));
    }
    for edge in store.all_edges() {
        out.push_str(&format!(
            "    {} -> {}{};\n",
            quote(&edge.source),
            quote(&edge.target),
            dot_attributes(&edge.attributes, Some(("key", edge.key.to_string()))),
        ));
    }
    out.push_str("}\n");
    out
}

// ============================================================================
// External renderer
// ============================================================================

/// Render with [`RenderConfig::from_env`].
pub fn render<S: GraphStore>(store: &S) -> Result<Vec<u8>> {
    render_with(store, &RenderConfig::from_env())
}

/// Pipe the graph's DOT text through the configured layout tool.
///
/// Fails with [`Error::Render`] if the executable cannot be started, exits
/// non-zero, or runs past `config.timeout` (the child is killed).
pub fn render_with<S: GraphStore>(store: &S, config: &RenderConfig) -> Result<Vec<u8>> {
    let dot = to_dot(store);
    let program = config.program.display().to_string();

    let mut child = Command::new(&config.program)
        .arg(format!("-T{}", config.format))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::Render(format!("{program} not found")),
            _ => Error::Render(format!("cannot start {program}: {e}")),
        })?;

    let (Some(mut stdin), Some(mut stdout), Some(mut stderr)) =
        (child.stdin.take(), child.stdout.take(), child.stderr.take())
    else {
        let _ = child.kill();
        return Err(Error::Render(format!("{program}: pipes unavailable")));
    };

    // Feed and drain on separate threads so a large graph cannot fill a pipe
    // and stall both sides.
    let writer = thread::spawn(move || stdin.write_all(dot.as_bytes()));
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).map(|_| buf)
    });
    let errors = thread::spawn(move || {
        let mut text = String::new();
        let _ = stderr.read_to_string(&mut text);
        text
    });

    let status = wait_until(&mut child, config.timeout, &program)?;

    let written = writer.join();
    let output = reader
        .join()
        .map_err(|_| Error::Render(format!("{program}: output reader panicked")))??;
    let stderr = errors.join().unwrap_or_default();

    if !status.success() {
        warn!(%program, %status, "renderer failed");
        return Err(Error::Render(format!("{program} exited with {status}: {}", stderr.trim())));
    }
    if let Ok(Err(e)) = written {
        return Err(Error::Render(format!("{program}: cannot write graph: {e}")));
    }

    debug!(%program, bytes = output.len(), "rendered graph");
    Ok(output)
}

/// Poll `child` until it exits, killing it once `timeout` has elapsed. Every
/// failure, including a failed status poll, is an [`Error::Render`].
fn wait_until(child: &mut Child, timeout: Duration, program: &str) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        let polled = child
            .try_wait()
            .map_err(|e| Error::Render(format!("{program}: cannot poll renderer: {e}")))?;
        if let Some(status) = polled {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            warn!(%program, timeout_ms = timeout.as_millis() as u64, "renderer timed out");
            return Err(Error::Render(format!("{program} timed out after {timeout:?}")));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeId, attributes};
    use crate::storage::MemoryStore;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote("a\nb"), r#""a\nb""#);
    }

    #[test]
    fn test_dot_keeps_parallel_edges_and_colors() {
        let mut store = MemoryStore::new();
        store.add_edge("oil", "cake", attributes([("color", Value::from(Rgb::GREEN))]));
        store.upsert_edge(EdgeId::new("oil", "cake", 1), attributes([("style", "dotted")]));
        store.add_node("cake", attributes([("servings", 4)]));

        let dot = to_dot(&store);

        assert!(dot.starts_with("digraph {\n"));
        assert!(dot.contains(r#""cake" ["servings"="4"];"#));
        assert!(dot.contains(r##""oil" -> "cake" ["key"="0", "color"="#00ff00"];"##));
        assert!(dot.contains(r#""oil" -> "cake" ["key"="1", "style"="dotted"];"#));
    }

    #[test]
    fn test_lists_render_as_json() {
        let attrs = attributes([("substitutes", Value::from(vec!["a", "b:1"]))]);
        assert_eq!(dot_attributes(&attrs, None), r#" ["substitutes"="[\"a\",\"b:1\"]"]"#);
    }

    #[test]
    fn test_missing_program_is_render_error() {
        let store = MemoryStore::new();
        let config = RenderConfig::default().with_program("/nonexistent/techgraph-layout-tool");
        assert!(matches!(render_with(&store, &config), Err(Error::Render(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_until_reports_render_errors() {
        let mut quick = Command::new("true").spawn().unwrap();
        assert!(wait_until(&mut quick, Duration::from_secs(5), "true").unwrap().success());

        let mut slow = Command::new("sleep").arg("5").spawn().unwrap();
        match wait_until(&mut slow, Duration::from_millis(50), "sleep") {
            Err(Error::Render(message)) => assert!(message.contains("timed out"), "{message}"),
            other => panic!("expected render error, got {other:?}"),
        }
    }
}
