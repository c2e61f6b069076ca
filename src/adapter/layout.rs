//! Two-column stacked geometry for a [`SankeyProjection`]
//!
//! Each column is stacked top to bottom. A node's height is its share of
//! the column's throughput, where throughput is `max(outgoing, incoming)`,
//! and nodes are separated by a fixed gap.

use super::sankey::SankeyProjection;
use crate::config::LayoutConfig;
use crate::graph::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Left,
    Right,
}

/// A node rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: NodeId,
    pub column: Column,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A link band, attached at the centre lines `source_y` and `target_y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedLink {
    pub source: NodeId,
    pub target: NodeId,
    pub value: f64,
    pub source_y: f64,
    pub target_y: f64,
    pub thickness: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyLayout {
    pub nodes: Vec<PositionedNode>,
    pub links: Vec<PositionedLink>,
}

#[derive(Default)]
struct Throughput {
    outgoing: f64,
    incoming: f64,
}

impl Throughput {
    fn value(&self) -> f64 {
        self.outgoing.max(self.incoming)
    }
}

/// Stack one column, returning rectangles in input order.
fn stack(
    ids: &[&NodeId],
    throughput: &HashMap<&NodeId, Throughput>,
    column: Column,
    config: &LayoutConfig,
) -> Vec<PositionedNode> {
    if ids.is_empty() {
        return Vec::new();
    }

    let total: f64 = ids.iter().map(|id| throughput[id].value()).sum();
    let gaps = config.node_gap * (ids.len() - 1) as f64;
    let available = (config.height - gaps).max(0.0);
    let x = match column {
        Column::Left => 0.0,
        Column::Right => (config.width - config.node_width).max(0.0),
    };

    let mut y = 0.0;
    ids.iter()
        .map(|id| {
            let share = if total > 0.0 {
                throughput[id].value() / total
            } else {
                1.0 / ids.len() as f64
            };
            let height = share * available;
            let node = PositionedNode {
                id: (*id).clone(),
                column,
                x,
                y,
                width: config.node_width,
                height,
            };
            y += height + config.node_gap;
            node
        })
        .collect()
}

impl SankeyLayout {
    /// Lay out a projection within `config.width × config.height`.
    ///
    /// Any projection of positive-weight links yields non-overlapping
    /// rectangles; a lone node in a column fills the full height.
    pub fn compute(projection: &SankeyProjection, config: &LayoutConfig) -> Self {
        if projection.links.is_empty() {
            return Self::default();
        }

        let mut throughput: HashMap<&NodeId, Throughput> = HashMap::new();
        for link in &projection.links {
            throughput.entry(&link.source).or_default().outgoing += link.value;
            throughput.entry(&link.target).or_default().incoming += link.value;
        }

        let in_layout = |id: &&NodeId| throughput.contains_key(id);
        let left: Vec<&NodeId> = projection
            .nodes
            .iter()
            .map(|n| &n.id)
            .filter(|id| projection.partition.left.contains(*id))
            .filter(in_layout)
            .collect();
        let right: Vec<&NodeId> = projection
            .nodes
            .iter()
            .map(|n| &n.id)
            .filter(|id| projection.partition.right.contains(*id))
            .filter(in_layout)
            .collect();

        let mut nodes = stack(&left, &throughput, Column::Left, config);
        nodes.extend(stack(&right, &throughput, Column::Right, config));

        // Links attach in link order, stacking down each node.
        let rects: HashMap<&NodeId, &PositionedNode> = nodes.iter().map(|n| (&n.id, n)).collect();
        let mut source_offset: HashMap<&NodeId, f64> = HashMap::new();
        let mut target_offset: HashMap<&NodeId, f64> = HashMap::new();
        let mut links = Vec::with_capacity(projection.links.len());

        for link in &projection.links {
            let (Some(source), Some(target)) = (rects.get(&link.source), rects.get(&link.target))
            else {
                continue;
            };
            let source_total = throughput[&link.source].value();
            let target_total = throughput[&link.target].value();
            let source_thickness = link.value / source_total * source.height;
            let target_thickness = link.value / target_total * target.height;

            let s = source_offset.entry(&link.source).or_insert(0.0);
            let source_y = source.y + *s + source_thickness / 2.0;
            *s += source_thickness;

            let t = target_offset.entry(&link.target).or_insert(0.0);
            let target_y = target.y + *t + target_thickness / 2.0;
            *t += target_thickness;

            links.push(PositionedLink {
                source: link.source.clone(),
                target: link.target.clone(),
                value: link.value,
                source_y,
                target_y,
                thickness: source_thickness,
            });
        }

        Self { nodes, links }
    }
}
