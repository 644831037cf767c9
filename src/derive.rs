//! # Edge Attribute Deriver
//!
//! Parent groups are a compact place to declare substitution and optional
//! prerequisites, but renderers and queries want that information on the
//! edges themselves. This module compiles each node's `parent_groups` into
//! edge attributes:
//!
//! | Group | Derived attributes on each member edge |
//! |-------|----------------------------------------|
//! | `Required(id)` | none |
//! | `Alternatives` without sentinel | `substitutes`, `color`, `optional: false`, `group_id` |
//! | `Alternatives` with sentinel | `style: "dotted"`, `optional: true`, `group_id` |
//!
//! `group_id` is `"<target>|<group index>"`. Derivation merges into existing
//! edge attributes and creates edges (and their endpoints) that do not exist
//! yet.
//!
//! ## Two phases
//!
//! The whole graph is scanned and every upsert is planned before the first
//! one is applied. Edges created by the pass therefore never change what the
//! same pass enumerates, and a malformed member aborts the pass with the
//! graph unchanged.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::key::KeyCodec;
use crate::model::*;
use crate::storage::GraphStore;
use crate::Result;

// ============================================================================
// Colors
// ============================================================================

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub [f64; 3]);

impl Rgb {
    pub const RED: Rgb = Rgb([1.0, 0.0, 0.0]);
    pub const GREEN: Rgb = Rgb([0.0, 1.0, 0.0]);
    pub const BLUE: Rgb = Rgb([0.0, 0.0, 1.0]);

    /// `#rrggbb`, channels clamped to `[0, 1]`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Read back a color stored as a three-number list.
    pub fn from_value(value: &Value) -> Option<Rgb> {
        match value.as_list()? {
            [r, g, b] => Some(Rgb([r.as_float()?, g.as_float()?, b.as_float()?])),
            _ => None,
        }
    }
}

impl From<Rgb> for Value {
    fn from(color: Rgb) -> Self {
        Value::List(color.0.iter().map(|c| Value::Float(*c)).collect())
    }
}

/// Restartable color sequence: red, green, blue, then random colors.
///
/// One source is created per derivation pass and passed in explicitly.
/// Only the first three colors are fixed; after that an unseeded source
/// gives different colors on every run. Use [`ColorSource::seeded`] when the
/// whole sequence has to repeat.
#[derive(Debug, Clone)]
pub struct ColorSource {
    drawn: usize,
    seed: Option<u64>,
    rng: StdRng,
}

impl ColorSource {
    const PRIMARIES: [Rgb; 3] = [Rgb::RED, Rgb::GREEN, Rgb::BLUE];

    pub fn new() -> Self {
        Self { drawn: 0, seed: None, rng: StdRng::from_os_rng() }
    }

    /// Source whose random tail is reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self { drawn: 0, seed: Some(seed), rng: StdRng::seed_from_u64(seed) }
    }

    /// Start over from red. A seeded source also replays its random tail.
    pub fn restart(&mut self) {
        self.drawn = 0;
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    /// Number of colors drawn since creation or the last restart.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn next_color(&mut self) -> Rgb {
        let color = match Self::PRIMARIES.get(self.drawn) {
            Some(primary) => *primary,
            None => Rgb([self.rng.random(), self.rng.random(), self.rng.random()]),
        };
        self.drawn += 1;
        color
    }
}

impl Default for ColorSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for ColorSource {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        Some(self.next_color())
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// What a derivation pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derivation {
    /// Alternatives groups processed (one color drawn per group).
    pub groups: usize,
    /// Edges upserted, in the order they were applied.
    pub edges: Vec<EdgeId>,
}

fn group_attributes(group: &[Option<String>], group_id: &str, optional: bool, color: Rgb) -> AttributeMap {
    let mut attrs = AttributeMap::new();
    if optional {
        attrs.insert("style".into(), Value::from("dotted"));
    } else {
        attrs.insert("substitutes".into(), Value::from(group.to_vec()));
        attrs.insert("color".into(), Value::from(color));
    }
    attrs.insert("optional".into(), Value::Bool(optional));
    attrs.insert("group_id".into(), Value::from(group_id));
    attrs
}

/// Compile every node's parent groups into edge attributes.
///
/// Nodes are visited in store order and groups in declaration order. Each
/// `Alternatives` group draws exactly one color from `colors`, including
/// optional groups and groups made only of the sentinel.
pub fn derive_edge_attributes<S: GraphStore>(store: &mut S, colors: &mut ColorSource) -> Result<Derivation> {
    let codec = KeyCodec::default();
    let mut derivation = Derivation::default();
    let mut planned: Vec<(EdgeId, AttributeMap)> = Vec::new();

    // Phase 1: scan.
    for node in store.all_nodes() {
        for (index, group) in node.parent_groups.iter().enumerate() {
            let ParentGroup::Alternatives(members) = group else {
                continue;
            };
            let optional = group.is_optional();
            let group_id = format!("{}|{}", node.id, index);
            let color = colors.next_color();
            derivation.groups += 1;
            debug!(%group_id, optional, members = members.len(), "deriving parent group");

            for member in members.iter().flatten() {
                let (parent, key) = codec.split(member)?;
                let attrs = group_attributes(members, &group_id, optional, color);
                planned.push((EdgeId { source: parent, target: node.id.clone(), key }, attrs));
            }
        }
    }

    // Phase 2: apply.
    let mut created = 0usize;
    for (id, attrs) in planned {
        if store.upsert_edge(id.clone(), attrs) {
            created += 1;
        }
        derivation.edges.push(id);
    }

    info!(
        groups = derivation.groups,
        edges = derivation.edges.len(),
        created,
        "derived edge attributes"
    );
    Ok(derivation)
}

// ============================================================================
// Tests
// ============================================================================
