//! Keep one direction per unordered node pair
//!
//! For strictly unidirectional diagrams. Where both `A → B` and `B → A`
//! exist, only the heavier direction survives; on a tie, the direction
//! whose source sorts first wins.

use crate::graph::{Edge, NodeId};
use std::collections::HashMap;

#[derive(Default)]
struct PairTotals {
    forward: f64,
    backward: f64,
    has_forward: bool,
    has_backward: bool,
}

/// Unordered pair key; `forward` is true when `source < target`.
fn pair_key(edge: &Edge) -> ((&NodeId, &NodeId), bool) {
    if edge.source < edge.target {
        ((&edge.source, &edge.target), true)
    } else {
        ((&edge.target, &edge.source), false)
    }
}

/// Drop self-loops and the lighter direction of every bidirectional pair.
///
/// Parallel edges in one direction are totalled when comparing directions
/// and survive or fall together. Output keeps input order.
pub fn break_cycles(edges: &[Edge]) -> Vec<Edge> {
    let mut pairs: HashMap<(&NodeId, &NodeId), PairTotals> = HashMap::new();
    for edge in edges.iter().filter(|e| !e.is_self_loop()) {
        let (key, forward) = pair_key(edge);
        let totals = pairs.entry(key).or_default();
        if forward {
            totals.forward += edge.value;
            totals.has_forward = true;
        } else {
            totals.backward += edge.value;
            totals.has_backward = true;
        }
    }

    edges
        .iter()
        .filter(|e| !e.is_self_loop())
        .filter(|e| {
            let (key, forward) = pair_key(e);
            let totals = &pairs[&key];
            if !(totals.has_forward && totals.has_backward) {
                return true;
            }
            let keep_forward = totals.forward >= totals.backward;
            forward == keep_forward
        })
        .cloned()
        .collect()
}
