//! MigrationGraph: the canonical node/edge model every tabular dataset lands in

use super::edge::Edge;
use super::node::{Node, NodeId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Structural invariant violations in a [`MigrationGraph`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("Edge {from} -> {to} references missing node {missing}")]
    MissingEndpoint {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    #[error("Self-loop on node {0}")]
    SelfLoop(NodeId),

    #[error("Edge {from} -> {to} has non-positive value {value}")]
    NonPositiveValue {
        from: NodeId,
        to: NodeId,
        value: f64,
    },
}

/// Nodes plus directed weighted edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationGraph {
    /// Unique nodes, sorted by label once a parser finishes
    pub nodes: Vec<Node>,
    /// Edges in file-encounter order
    pub edges: Vec<Edge>,
}

impl MigrationGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Find a node by id
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Sort nodes by label for presentation
    pub fn sort_nodes_by_label(&mut self) {
        self.nodes.sort_by(|a, b| compare_labels(&a.label, &b.label));
    }

    /// Check the data-model invariants: unique ids, existing endpoints,
    /// no self-loops, strictly positive values.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(&node.id) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint) {
                    return Err(GraphError::MissingEndpoint {
                        from: edge.source.clone(),
                        to: edge.target.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
            if edge.is_self_loop() {
                return Err(GraphError::SelfLoop(edge.source.clone()));
            }
            if !(edge.value > 0.0) {
                return Err(GraphError::NonPositiveValue {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                    value: edge.value,
                });
            }
        }

        Ok(())
    }
}

/// Accumulates first-seen nodes while a parser walks its input.
#[derive(Debug, Default)]
pub(crate) struct NodeRegistry {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
}

impl NodeRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert the node unless its id was already seen; first label wins.
    pub(crate) fn ensure(&mut self, node: Node) {
        if self.index.contains_key(&node.id) {
            return;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    pub(crate) fn into_graph(self, edges: Vec<Edge>) -> MigrationGraph {
        let mut graph = MigrationGraph::new(self.nodes, edges);
        graph.sort_nodes_by_label();
        graph
    }
}

/// Case-insensitive label ordering with a byte-wise tie-break
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
