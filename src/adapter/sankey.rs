//! Sankey projection: strict bipartite left → right flows
//!
//! Sankey layouts cannot draw cycles, so nodes are split into a left
//! (source) and a right (target) column first. A node that both sends and
//! receives ("mixed") is placed on the left, and any edge that would then
//! point into the left column is dropped.
//!
//! This is lossy on purpose. For a highly cyclic graph, such as
//! state-to-state migration where most states both send and receive, most
//! edges can be dropped. The count is reported in
//! [`SankeyProjection::dropped_edges`].

use crate::graph::{Edge, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// How a node takes part in the edge set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Only ever a source
    PureSource,
    /// Only ever a target
    PureTarget,
    /// Both a source and a target
    Mixed,
}

/// Disjoint left/right node sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BipartitePartition {
    pub left: BTreeSet<NodeId>,
    pub right: BTreeSet<NodeId>,
}

impl BipartitePartition {
    /// Whether the edge runs strictly from the left set to the right set
    pub fn admits(&self, edge: &Edge) -> bool {
        self.left.contains(&edge.source)
            && self.right.contains(&edge.target)
            && !self.right.contains(&edge.source)
            && !self.left.contains(&edge.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyNode {
    pub id: NodeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLink {
    pub source: NodeId,
    pub target: NodeId,
    pub value: f64,
}

/// Nodes and links ready for a Sankey renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyProjection {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
    pub partition: BipartitePartition,
    /// Edges discarded to keep the layout bipartite (self-loops included)
    pub dropped_edges: usize,
}

impl SankeyProjection {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Classify every node touched by `edges`. Self-loops are ignored.
pub fn classify(edges: &[Edge]) -> HashMap<NodeId, NodeRole> {
    let mut sources = HashSet::new();
    let mut targets = HashSet::new();
    for edge in edges.iter().filter(|e| !e.is_self_loop()) {
        sources.insert(&edge.source);
        targets.insert(&edge.target);
    }

    sources
        .union(&targets)
        .map(|id| {
            let role = match (sources.contains(id), targets.contains(id)) {
                (true, false) => NodeRole::PureSource,
                (false, true) => NodeRole::PureTarget,
                _ => NodeRole::Mixed,
            };
            ((*id).clone(), role)
        })
        .collect()
}

/// Split the nodes touched by `edges` into left and right columns.
///
/// Pure sources go left, pure targets go right, mixed nodes go left.
pub fn partition(edges: &[Edge]) -> BipartitePartition {
    let mut result = BipartitePartition::default();
    for (id, role) in classify(edges) {
        match role {
            NodeRole::PureSource | NodeRole::Mixed => result.left.insert(id),
            NodeRole::PureTarget => result.right.insert(id),
        };
    }
    result
}

/// Project nodes and edges into a Sankey-ready structure.
///
/// Edges with an endpoint missing from `nodes` are dropped along with
/// self-loops and edges the partition does not admit. Nodes left without
/// any surviving link are omitted. Empty input yields an empty projection.
pub fn to_sankey(nodes: &[Node], edges: &[Edge]) -> SankeyProjection {
    let known: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();

    let candidates: Vec<Edge> = edges
        .iter()
        .filter(|e| !e.is_self_loop())
        .filter(|e| known.contains(&e.source) && known.contains(&e.target))
        .cloned()
        .collect();

    let partition = partition(&candidates);

    let links: Vec<SankeyLink> = candidates
        .iter()
        .filter(|e| partition.admits(e))
        .map(|e| SankeyLink {
            source: e.source.clone(),
            target: e.target.clone(),
            value: e.value,
        })
        .collect();

    let linked: HashSet<&NodeId> = links
        .iter()
        .flat_map(|l| [&l.source, &l.target])
        .collect();

    let mut seen = HashSet::new();
    let sankey_nodes: Vec<SankeyNode> = nodes
        .iter()
        .filter(|n| linked.contains(&n.id) && seen.insert(&n.id))
        .map(|n| SankeyNode {
            id: n.id.clone(),
            name: n.display_name().to_string(),
        })
        .collect();

    let dropped_edges = edges.len() - links.len();
    if dropped_edges > 0 {
        tracing::debug!(
            total = edges.len(),
            kept = links.len(),
            dropped = dropped_edges,
            "sankey partition dropped edges"
        );
    }

    SankeyProjection {
        nodes: sankey_nodes,
        links,
        partition,
        dropped_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(NodeId::from(*id), *id)).collect()
    }

    fn edge(s: &str, t: &str, v: f64) -> Edge {
        Edge::new(s, t, v)
    }

    // === Scenario: two-cycle cannot be drawn ===
    #[test]
    fn two_cycle_drops_both_edges() {
        let projection = to_sankey(
            &nodes(&["A", "B"]),
            &[edge("A", "B", 10.0), edge("B", "A", 5.0)],
        );
        assert!(projection.links.is_empty());
        assert!(projection.nodes.is_empty());
        assert_eq!(projection.dropped_edges, 2);
    }

    #[test]
    fn pure_bipartite_graph_survives_intact() {
        let projection = to_sankey(
            &nodes(&["A", "B", "X", "Y"]),
            &[edge("A", "X", 3.0), edge("A", "Y", 1.0), edge("B", "Y", 2.0)],
        );
        assert_eq!(projection.links.len(), 3);
        assert_eq!(projection.dropped_edges, 0);
        assert_eq!(projection.nodes.len(), 4);
        assert!(projection.partition.left.contains(&NodeId::from("A")));
        assert!(projection.partition.right.contains(&NodeId::from("Y")));
    }

    #[test]
    fn mixed_nodes_go_left_and_lose_incoming_edges() {
        // B both receives (from A) and sends (to C)
        let projection = to_sankey(
            &nodes(&["A", "B", "C"]),
            &[edge("A", "B", 4.0), edge("B", "C", 2.0)],
        );
        let roles = classify(&[edge("A", "B", 4.0), edge("B", "C", 2.0)]);
        assert_eq!(roles[&NodeId::from("A")], NodeRole::PureSource);
        assert_eq!(roles[&NodeId::from("B")], NodeRole::Mixed);
        assert_eq!(roles[&NodeId::from("C")], NodeRole::PureTarget);
        assert!(projection.partition.left.contains(&NodeId::from("B")));
        assert_eq!(
            projection.links,
            vec![SankeyLink { source: "B".into(), target: "C".into(), value: 2.0 }]
        );
        let names: Vec<&str> = projection.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn partition_is_disjoint() {
        let edges = vec![
            edge("A", "B", 1.0),
            edge("B", "C", 1.0),
            edge("C", "A", 1.0),
            edge("D", "A", 1.0),
            edge("A", "E", 1.0),
        ];
        let p = partition(&edges);
        assert!(p.left.is_disjoint(&p.right));
        assert_eq!(p.right, BTreeSet::from([NodeId::from("E")]));
    }

    #[test]
    fn self_loops_are_dropped_and_do_not_make_nodes_mixed() {
        let projection = to_sankey(
            &nodes(&["A", "B"]),
            &[edge("A", "B", 2.0), edge("B", "B", 9.0)],
        );
        assert_eq!(projection.links.len(), 1);
        assert_eq!(projection.dropped_edges, 1);
    }

    #[test]
    fn name_falls_back_to_id() {
        let mut ns = nodes(&["A", "B"]);
        ns[0].label = String::new();
        let projection = to_sankey(&ns, &[edge("A", "B", 2.0)]);
        assert_eq!(projection.nodes[0].name, "A");
    }

    #[test]
    fn unknown_endpoints_are_dropped() {
        let projection = to_sankey(&nodes(&["A"]), &[edge("A", "Z", 2.0)]);
        assert!(projection.is_empty());
        assert_eq!(projection.dropped_edges, 1);
    }

    #[test]
    fn empty_input_gives_empty_projection() {
        let projection = to_sankey(&[], &[]);
        assert_eq!(projection, SankeyProjection::default());
    }
}
