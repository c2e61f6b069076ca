//! Chord projection: a square flow matrix over every node
//!
//! Chord diagrams draw bidirectional and reflexive flows natively, so no
//! partitioning or cycle breaking happens here.

use crate::graph::{Edge, Node, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChordProjection {
    /// `matrix[i][j]` is the total flow from `nodes[i]` to `nodes[j]`
    pub matrix: Vec<Vec<f64>>,
    /// Display labels aligned with matrix indices
    pub labels: Vec<String>,
    pub nodes: Vec<Node>,
}

impl ChordProjection {
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| &n.id == id)
    }

    /// Flow from `source` to `target`, zero when either is absent
    pub fn flow(&self, source: &NodeId, target: &NodeId) -> f64 {
        match (self.index_of(source), self.index_of(target)) {
            (Some(i), Some(j)) => self.matrix[i][j],
            _ => 0.0,
        }
    }
}

/// Build an `n × n` matrix from `edges`, `n = nodes.len()`.
///
/// Parallel edges accumulate. Edges with an endpoint missing from `nodes`
/// are skipped.
pub fn to_chord(nodes: &[Node], edges: &[Edge]) -> ChordProjection {
    let n = nodes.len();
    let mut index: HashMap<&NodeId, usize> = HashMap::with_capacity(n);
    for (i, node) in nodes.iter().enumerate() {
        index.entry(&node.id).or_insert(i);
    }

    let mut matrix = vec![vec![0.0; n]; n];
    for edge in edges {
        if let (Some(&i), Some(&j)) = (index.get(&edge.source), index.get(&edge.target)) {
            matrix[i][j] += edge.value;
        }
    }

    ChordProjection {
        matrix,
        labels: nodes.iter().map(|n| n.display_name().to_string()).collect(),
        nodes: nodes.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::new(NodeId::from(*id), format!("{id} label"))).collect()
    }

    #[test]
    fn keeps_bidirectional_and_reflexive_flows() {
        let chord = to_chord(
            &nodes(&["A", "B"]),
            &[Edge::new("A", "B", 10.0), Edge::new("B", "A", 5.0), Edge::new("A", "A", 3.0)],
        );
        assert_eq!(chord.matrix, vec![vec![3.0, 10.0], vec![5.0, 0.0]]);
        assert_eq!(chord.flow(&"A".into(), &"B".into()), 10.0);
        assert_eq!(chord.flow(&"B".into(), &"A".into()), 5.0);
        assert_eq!(chord.flow(&"A".into(), &"A".into()), 3.0);
    }

    #[test]
    fn parallel_edges_accumulate() {
        let chord = to_chord(
            &nodes(&["A", "B"]),
            &[Edge::new("A", "B", 1.5), Edge::new("A", "B", 2.5)],
        );
        assert_eq!(chord.matrix[0][1], 4.0);
    }

    #[test]
    fn labels_align_and_fall_back_to_id() {
        let mut ns = nodes(&["A", "B"]);
        ns[1].label = String::new();
        let chord = to_chord(&ns, &[]);
        assert_eq!(chord.labels, vec!["A label", "B"]);
        assert_eq!(chord.matrix, vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        assert_eq!(chord.nodes, ns);
    }

    #[test]
    fn unknown_endpoints_are_skipped() {
        let chord = to_chord(&nodes(&["A"]), &[Edge::new("A", "Q", 9.0)]);
        assert_eq!(chord.matrix, vec![vec![0.0]]);
    }

    #[test]
    fn empty_input_gives_empty_projection() {
        assert_eq!(to_chord(&[], &[]), ChordProjection::default());
    }
}
