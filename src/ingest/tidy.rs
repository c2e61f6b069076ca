//! Tidy CSV: one row per directed flow
//!
//! ```text
//! period,source_id,source_label,destination_id,destination_label,estimate,moe
//! 2021,CA,California,TX,Texas,12500,500
//! ```
//!
//! Column order is not significant and names match case-insensitively.
//! Columns outside the core set are carried as edge attributes.

use super::csv::{lines, split_line};
use super::labeled_node;
use crate::error::FormatError;
use crate::graph::{Edge, MigrationGraph, NodeId, NodeRegistry, PropertyValue};
use crate::normalize::{normalize_id, parse_number};
use std::collections::HashMap;

const SOURCE_ID: &str = "source_id";
const SOURCE_LABEL: &str = "source_label";
const DESTINATION_ID: &str = "destination_id";
const DESTINATION_LABEL: &str = "destination_label";
const ESTIMATE: &str = "estimate";
const MOE: &str = "moe";

const REQUIRED: [&str; 3] = [SOURCE_LABEL, DESTINATION_LABEL, ESTIMATE];
const CORE: [&str; 6] = [SOURCE_ID, SOURCE_LABEL, DESTINATION_ID, DESTINATION_LABEL, ESTIMATE, MOE];

/// Header row resolved to column positions
struct Columns {
    index: HashMap<String, usize>,
    extras: Vec<(String, usize)>,
}

impl Columns {
    fn from_header(line: &str) -> Result<Self, FormatError> {
        let mut index = HashMap::new();
        let mut extras = Vec::new();
        for (i, cell) in split_line(line).iter().enumerate() {
            let name = cell.trim().to_lowercase();
            if name.is_empty() || index.contains_key(&name) {
                continue;
            }
            if !CORE.contains(&name.as_str()) {
                extras.push((name.clone(), i));
            }
            index.insert(name, i);
        }

        let missing: Vec<String> = REQUIRED
            .iter()
            .filter(|name| !index.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(FormatError::MissingColumns(missing));
        }

        Ok(Self { index, extras })
    }

    fn cell<'a>(&self, row: &'a [String], name: &str) -> &'a str {
        self.index
            .get(name)
            .and_then(|&i| row.get(i))
            .map(|s| s.trim())
            .unwrap_or("")
    }
}

/// Resolve an endpoint's (id, label) from its id and label cells.
///
/// A supplied id is normalized like a label; a missing one is derived from
/// the label. Returns `None` when neither yields an id.
fn endpoint(raw_id: &str, raw_label: &str) -> Option<(NodeId, String)> {
    let id = match normalize_id(raw_id) {
        id if !id.is_empty() => id,
        _ => normalize_id(raw_label),
    };
    if id.is_empty() {
        return None;
    }
    let label = if raw_label.is_empty() { raw_id } else { raw_label };
    Some((NodeId::from_string(id), label.to_string()))
}

/// Typed value for an extra column cell
fn extra_value(cell: &str) -> PropertyValue {
    if let Ok(n) = cell.parse::<i64>() {
        return PropertyValue::Int(n);
    }
    match cell.parse::<f64>() {
        Ok(f) if f.is_finite() => PropertyValue::Float(f),
        _ => PropertyValue::String(cell.to_string()),
    }
}

/// Parse tidy CSV text.
///
/// Fails on fewer than two lines or missing `source_label`,
/// `destination_label` or `estimate` columns. Rows with an unusable
/// estimate, unresolvable endpoints or identical endpoints are dropped.
pub fn parse_tidy(text: &str) -> Result<MigrationGraph, FormatError> {
    let all = lines(text);
    if all.len() < 2 {
        return Err(FormatError::TooFewLines {
            expected: 2,
            found: all.len(),
        });
    }

    let columns = Columns::from_header(all[0])?;
    let mut registry = NodeRegistry::new();
    let mut edges = Vec::new();
    let mut dropped = 0usize;

    for (line_no, line) in all.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let row = split_line(line);

        let source = endpoint(columns.cell(&row, SOURCE_ID), columns.cell(&row, SOURCE_LABEL));
        let target = endpoint(
            columns.cell(&row, DESTINATION_ID),
            columns.cell(&row, DESTINATION_LABEL),
        );
        let (Some((source_id, source_label)), Some((target_id, target_label))) = (source, target)
        else {
            tracing::debug!(line = line_no + 1, "tidy row without resolvable endpoints");
            dropped += 1;
            continue;
        };

        registry.ensure(labeled_node(source_id.clone(), source_label));
        registry.ensure(labeled_node(target_id.clone(), target_label));

        if source_id == target_id {
            tracing::debug!(line = line_no + 1, id = %source_id, "tidy self-flow dropped");
            dropped += 1;
            continue;
        }

        let estimate = parse_number(columns.cell(&row, ESTIMATE));
        if !estimate.is_finite() || estimate <= 0.0 {
            tracing::debug!(line = line_no + 1, "tidy row with unusable estimate");
            dropped += 1;
            continue;
        }

        let mut edge = Edge::new(source_id, target_id, estimate);
        let moe = parse_number(columns.cell(&row, MOE));
        if moe.is_finite() && moe > 0.0 {
            edge.moe = Some(moe);
        }
        for (name, i) in &columns.extras {
            let cell = row.get(*i).map(|s| s.trim()).unwrap_or("");
            if !cell.is_empty() {
                edge.attributes.insert(name.clone(), extra_value(cell));
            }
        }
        edges.push(edge);
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = edges.len(), "tidy rows dropped");
    }

    Ok(registry.into_graph(edges))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "period,source_id,source_label,destination_id,destination_label,estimate,moe";

    // === Scenario: single tidy row ===
    #[test]
    fn single_row_parses_to_one_edge() {
        let text = format!("{HEADER}\n2021,CA,California,TX,Texas,12500,500\n");
        let graph = parse_tidy(&text).unwrap();

        let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["California", "Texas"]);

        assert_eq!(graph.edges.len(), 1);
        let edge = &graph.edges[0];
        assert_eq!(edge.source.as_str(), "CA");
        assert_eq!(edge.target.as_str(), "TX");
        assert_eq!(edge.value, 12500.0);
        assert_eq!(edge.moe, Some(500.0));
        assert_eq!(edge.attributes.get("period"), Some(&PropertyValue::Int(2021)));
    }

    #[test]
    fn nodes_carry_region_classification() {
        let text = format!("{HEADER}\n2021,CA,California,TX,Texas,12500,500\n");
        let graph = parse_tidy(&text).unwrap();
        let ca = graph.node(&NodeId::from_string("CA")).unwrap();
        assert_eq!(ca.categories.get("region").map(String::as_str), Some("West"));
        assert_eq!(ca.categories.get("division").map(String::as_str), Some("Pacific"));
    }

    #[test]
    fn abbreviated_labels_get_no_region() {
        let text = "source_label,destination_label,estimate\nCalif.,Tex.,10\n";
        let graph = parse_tidy(text).unwrap();
        assert!(graph.nodes.iter().all(|n| n.categories.is_empty()));
    }

    #[test]
    fn ids_are_derived_when_absent() {
        let text = "Source_Label,DESTINATION_LABEL,Estimate\nNew York,New Jersey,\"1,200\"\n";
        let graph = parse_tidy(text).unwrap();
        assert_eq!(graph.edges[0].source.as_str(), "NEW_YORK");
        assert_eq!(graph.edges[0].target.as_str(), "NEW_JERSEY");
        assert_eq!(graph.edges[0].value, 1200.0);
        assert_eq!(graph.edges[0].moe, None);
    }

    #[test]
    fn blank_id_cells_fall_back_to_labels() {
        let text = format!("{HEADER}\n2021,,Ohio,,Iowa,40,\n");
        let graph = parse_tidy(&text).unwrap();
        assert_eq!(graph.edges[0].source.as_str(), "OHIO");
        assert_eq!(graph.edges[0].target.as_str(), "IOWA");
    }

    #[test]
    fn bad_estimates_drop_rows_not_parse() {
        let text = format!(
            "{HEADER}\n\
             2021,CA,California,TX,Texas,0,5\n\
             2021,CA,California,NV,Nevada,N/A,5\n\
             2021,CA,California,OR,Oregon,,5\n\
             2021,CA,California,AZ,Arizona,300,+/-20\n"
        );
        let graph = parse_tidy(&text).unwrap();
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].target.as_str(), "AZ");
        assert_eq!(graph.edges[0].moe, Some(20.0));
        assert_eq!(graph.validate(), Ok(()));
    }

    #[test]
    fn self_flows_are_dropped() {
        let text = format!("{HEADER}\n2021,CA,California,CA,California,900,5\n");
        let graph = parse_tidy(&text).unwrap();
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn quoted_labels_keep_commas() {
        let text = "source_label,destination_label,estimate\n\"Washington, D.C.\",Maryland,77\n";
        let graph = parse_tidy(text).unwrap();
        assert!(graph.nodes.iter().any(|n| n.label == "Washington, D.C."));
        assert_eq!(graph.edges[0].source.as_str(), "WASHINGTON_DC");
    }

    #[test]
    fn missing_required_columns_fail() {
        let err = parse_tidy("source_id,destination_id,estimate\nCA,TX,4\n").unwrap_err();
        match err {
            FormatError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["source_label", "destination_label"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_fails() {
        assert!(matches!(
            parse_tidy(HEADER),
            Err(FormatError::TooFewLines { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn edges_keep_file_order() {
        let text = format!(
            "{HEADER}\n\
             2021,WY,Wyoming,AL,Alabama,1,\n\
             2021,AL,Alabama,WY,Wyoming,2,\n\
             2021,CO,Colorado,AL,Alabama,3,\n"
        );
        let graph = parse_tidy(&text).unwrap();
        let values: Vec<f64> = graph.edges.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);

        let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Alabama", "Colorado", "Wyoming"]);
    }
}
