//! Parsers from raw dataset text into the graph model
//!
//! Callers supply the text; nothing here reads files or the network.

mod csv;
mod gexf;
mod legacy;
mod tidy;

pub use csv::{detect_schema, parse_csv, split_line, CsvSchema};
pub use gexf::{parse_gexf, AttributeType};
pub use legacy::parse_legacy;
pub use tidy::parse_tidy;

use crate::error::FormatError;
use crate::graph::{MigrationGraph, Node, NodeId, TemporalGraph, TimeRange};
use crate::regions::region_of;
use serde::{Deserialize, Serialize};

/// Node with region/division categories when the label is a known state
pub(crate) fn labeled_node(id: NodeId, label: String) -> Node {
    let region = region_of(&label);
    let mut node = Node::new(id, label);
    if let Some(region) = region {
        node = node
            .with_category("region", region.region)
            .with_category("division", region.division);
    }
    node
}

/// Any parsed dataset, in the shape handed to the storage collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Dataset {
    Migration(MigrationGraph),
    Temporal(TemporalGraph),
}

impl Dataset {
    /// Time range for temporal data; tabular data has none
    pub fn time_range(&self) -> Option<TimeRange> {
        match self {
            Self::Migration(_) => None,
            Self::Temporal(graph) => Some(graph.time_range),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Self::Migration(graph) => graph.nodes.len(),
            Self::Temporal(graph) => graph.nodes.len(),
        }
    }

    pub fn edge_count(&self) -> usize {
        match self {
            Self::Migration(graph) => graph.edges.len(),
            Self::Temporal(graph) => graph.edges.len(),
        }
    }
}

/// Parse text of any supported format: GEXF when it starts with `<`,
/// CSV otherwise.
pub fn ingest(text: &str) -> Result<Dataset, FormatError> {
    let trimmed = csv::strip_bom(text).trim_start();
    if trimmed.is_empty() {
        return Err(FormatError::EmptyInput);
    }
    if trimmed.starts_with('<') {
        parse_gexf(trimmed).map(Dataset::Temporal)
    } else {
        parse_csv(trimmed).map(Dataset::Migration)
    }
}
