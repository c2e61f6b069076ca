//! Visualization adapters
//!
//! Pure functions that re-project a node/edge graph into the structures a
//! particular flow diagram needs. Degenerate input (no nodes, no edges)
//! yields an empty projection, never an error.

mod chord;
mod cycles;
mod filter;
mod layout;
mod sankey;

pub use chord::{to_chord, ChordProjection};
pub use cycles::break_cycles;
pub use filter::{aggregate_by_key, filter_by_property, GroupBy};
pub use layout::{Column, PositionedLink, PositionedNode, SankeyLayout};
pub use sankey::{
    classify, partition, to_sankey, BipartitePartition, NodeRole, SankeyLink, SankeyNode,
    SankeyProjection,
};
