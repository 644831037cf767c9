use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use techgraph::export::{self, GraphSource};
use techgraph::{AttributeMap, TechGraph};

#[derive(Parser)]
#[command(
    name = "techgraph",
    version,
    about = "Inspect, annotate and render prerequisite multigraphs",
    long_about = "Reads a tech graph blob, optionally edits and annotates it, then prints the blob, \
                  a description of one node, or an SVG rendering."
)]
struct Cli {
    /// Graph blob to read, or `-` for stdin
    input: String,

    /// Add an edge SRC -> DST before anything else (repeatable)
    #[arg(long, num_args = 2, value_names = ["SRC", "DST"], action = clap::ArgAction::Append)]
    add_edge: Vec<String>,

    /// Title-case every node name and group reference
    #[arg(long)]
    normalize: bool,

    /// Materialize parent groups as edge attributes
    #[arg(long)]
    derive: bool,

    /// Narrow the graph to the neighborhood of NODE
    #[arg(long, value_name = "NODE")]
    nearby: Option<String>,

    /// Node budget for --nearby
    #[arg(long, default_value = "100")]
    count: usize,

    /// Print what NODE requires instead of the blob
    #[arg(long, value_name = "NODE")]
    describe: Option<String>,

    /// Render to an SVG file instead of printing the blob
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut graph = read_graph(&cli.input)?;

    for pair in cli.add_edge.chunks(2) {
        if let [src, dst] = pair {
            graph.add_edge(src, dst, AttributeMap::new());
        }
    }
    if cli.normalize {
        graph.normalize_names().context("normalizing names")?;
    }
    if cli.derive {
        let derivation = graph.derive_edge_attributes().context("deriving edge attributes")?;
        info!(groups = derivation.groups, edges = derivation.edges.len(), "derived");
    }
    if let Some(node) = &cli.nearby {
        graph = graph
            .nearby_subgraph(node, cli.count)
            .with_context(|| format!("collecting neighborhood of {node:?}"))?;
    }

    if let Some(node) = &cli.describe {
        println!("{}", graph.description(node).with_context(|| format!("describing {node:?}"))?);
    } else if let Some(path) = &cli.svg {
        let svg = graph.to_svg().context("rendering graph")?;
        fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        export::export_to_writer(graph.store(), &mut out).context("writing graph blob")?;
        out.flush()?;
    }
    Ok(())
}

fn read_graph(input: &str) -> Result<TechGraph> {
    let source = if input == "-" {
        GraphSource::Reader(Box::new(io::stdin()))
    } else {
        GraphSource::Path(PathBuf::from(input))
    };
    export::load(source).with_context(|| format!("loading graph from {input}"))
}
