//! Migraflow: Migration-Flow Ingestion and Visualization Adapters
//!
//! Reconciles heterogeneous migration datasets into one node/edge model and
//! re-projects that model for flow diagrams.
//!
//! # Core Concepts
//!
//! - **Ingest**: tidy and legacy wide census CSVs become a [`MigrationGraph`];
//!   GEXF becomes a [`TemporalGraph`] whose entities are valid over spells
//! - **Snapshots**: a temporal graph materialized at one integer timestamp
//! - **Adapters**: pure projections into Sankey (strict bipartite) and Chord
//!   (square matrix) structures
//!
//! All operations are synchronous and allocate fresh results; callers supply
//! raw text and own everything returned.
//!
//! # Example
//!
//! ```
//! use migraflow::{ingest::parse_csv, adapter::to_chord};
//!
//! let csv = "period,source_id,source_label,destination_id,destination_label,estimate,moe\n\
//!            2021,CA,California,TX,Texas,12500,500\n";
//! let graph = parse_csv(csv).unwrap();
//! let chord = to_chord(&graph.nodes, &graph.edges);
//! assert_eq!(chord.labels, vec!["California", "Texas"]);
//! ```

pub mod adapter;
pub mod config;
mod error;
mod graph;
pub mod ingest;
pub mod normalize;
pub mod regions;

pub use config::{FlowConfig, LayoutConfig};
pub use error::{FlowError, FlowResult, FormatError};
pub use graph::{
    compare_labels, Edge, GraphError, MigrationGraph, Node, NodeId, Properties, PropertyValue,
    Snapshot, Spell, TemporalEdge, TemporalGraph, TemporalNode, TimeRange,
};
pub use ingest::{ingest, Dataset};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
