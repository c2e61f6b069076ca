//! Core graph data structures

mod edge;
mod migration;
mod node;
mod temporal;


pub use edge::Edge;
pub use migration::{compare_labels, GraphError, MigrationGraph};
pub(crate) use migration::NodeRegistry;
pub use node::{Node, NodeId, Properties, PropertyValue};
pub use temporal::{Snapshot, Spell, TemporalEdge, TemporalGraph, TemporalNode, TimeRange};
