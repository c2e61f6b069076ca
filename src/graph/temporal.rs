//! Temporal graphs: entities valid over integer intervals ("spells")
//!
//! A node or edge is active at timestamp `t` when any of its spells
//! contains `t`. Node activity and edge activity are independent: a
//! snapshot may hold an edge whose endpoints are inactive that year.

use super::edge::Edge;
use super::migration::{MigrationGraph, NodeRegistry};
use super::node::{Node, NodeId, Properties, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A closed interval `[start, end]` during which an entity is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub start: i64,
    pub end: i64,
}

impl Spell {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends
    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Min/max over every spell endpoint in a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    /// Compute the range covering `spells`; `{0, 0}` when there are none.
    pub fn covering<'a>(spells: impl IntoIterator<Item = &'a Spell>) -> Self {
        let mut range: Option<(i64, i64)> = None;
        for spell in spells {
            let lo = spell.start.min(spell.end);
            let hi = spell.start.max(spell.end);
            range = Some(match range {
                Some((start, end)) => (start.min(lo), end.max(hi)),
                None => (lo, hi),
            });
        }
        let (start, end) = range.unwrap_or((0, 0));
        Self { start, end }
    }

    /// Number of integer timestamps in the range, saturating at `u64::MAX`
    pub fn span(&self) -> u64 {
        self.end.abs_diff(self.start).saturating_add(1)
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i64> {
        self.start..=self.end
    }
}

fn active_at(spells: &[Spell], timestamp: i64) -> bool {
    spells.iter().any(|s| s.contains(timestamp))
}

/// A node with typed attributes and validity intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalNode {
    pub id: NodeId,
    pub label: String,
    #[serde(default)]
    pub attributes: Properties,
    #[serde(default)]
    pub spells: Vec<Spell>,
}

impl TemporalNode {
    pub fn is_active_at(&self, timestamp: i64) -> bool {
        active_at(&self.spells, timestamp)
    }
}

/// An edge with weight, typed attributes and validity intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
    #[serde(default)]
    pub attributes: Properties,
    #[serde(default)]
    pub spells: Vec<Spell>,
}

impl TemporalEdge {
    pub fn is_active_at(&self, timestamp: i64) -> bool {
        active_at(&self.spells, timestamp)
    }
}

/// Nodes and edges with validity intervals, plus their overall time range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalGraph {
    pub nodes: Vec<TemporalNode>,
    pub edges: Vec<TemporalEdge>,
    pub time_range: TimeRange,
    /// `defaultedgetype` of the source graph, when declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_edge_type: Option<String>,
}

impl TemporalGraph {
    /// Build a graph and compute its time range from every spell.
    pub fn new(nodes: Vec<TemporalNode>, edges: Vec<TemporalEdge>) -> Self {
        let time_range = TimeRange::covering(
            nodes
                .iter()
                .flat_map(|n| n.spells.iter())
                .chain(edges.iter().flat_map(|e| e.spells.iter())),
        );
        Self {
            nodes,
            edges,
            time_range,
            default_edge_type: None,
        }
    }

    /// The entities active at `timestamp`.
    ///
    /// Edges are filtered by their own spells only; their endpoints'
    /// activity is not consulted.
    pub fn snapshot(&self, timestamp: i64) -> Snapshot {
        Snapshot {
            timestamp,
            nodes: self
                .nodes
                .iter()
                .filter(|n| n.is_active_at(timestamp))
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| e.is_active_at(timestamp))
                .cloned()
                .collect(),
        }
    }

    /// One snapshot per integer in `time_range`, inclusive.
    ///
    /// Cost is `O(range × (nodes + edges))`. The range comes straight from the
    /// input and is not bounded here: callers must check
    /// `time_range.span()` against their own limit before calling.
    pub fn materialize_all(&self) -> Vec<Snapshot> {
        self.time_range.years().map(|year| self.snapshot(year)).collect()
    }
}

/// The subset of a temporal graph active at one timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: i64,
    pub nodes: Vec<TemporalNode>,
    pub edges: Vec<TemporalEdge>,
}

impl Snapshot {
    /// Convert into the canonical flow model so the adapters apply.
    ///
    /// Edges that cannot be flows (self-loops, non-positive weight) or whose
    /// endpoints are inactive in this snapshot are left out of the result.
    pub fn to_migration_graph(&self) -> MigrationGraph {
        let mut registry = NodeRegistry::new();
        let mut active: HashSet<&NodeId> = HashSet::with_capacity(self.nodes.len());

        for tnode in &self.nodes {
            active.insert(&tnode.id);
            let mut node = Node::new(tnode.id.clone(), tnode.label.clone());
            for (key, value) in &tnode.attributes {
                match value {
                    PropertyValue::Int(_) | PropertyValue::Float(_) => {
                        if let Some(n) = value.as_f64() {
                            node.numerics.insert(key.clone(), n);
                        }
                    }
                    PropertyValue::Array(_) => {}
                    other => {
                        node.categories.insert(key.clone(), other.to_string());
                    }
                }
            }
            registry.ensure(node);
        }

        let mut dropped = 0usize;
        let edges: Vec<Edge> = self
            .edges
            .iter()
            .filter(|e| {
                let keep = e.source != e.target
                    && e.weight > 0.0
                    && active.contains(&e.source)
                    && active.contains(&e.target);
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .map(|e| Edge {
                source: e.source.clone(),
                target: e.target.clone(),
                value: e.weight,
                moe: None,
                attributes: e.attributes.clone(),
            })
            .collect();

        if dropped > 0 {
            tracing::debug!(
                timestamp = self.timestamp,
                dropped,
                "snapshot edges left out of flow graph"
            );
        }

        registry.into_graph(edges)
    }
}
