//! Legacy wide CSV: the state-to-state migration table as exported
//!
//! Layout:
//! - line 0: generic table metadata (ignored)
//! - line 1: destination header; names sit at every other column from
//!   column 7, each followed by its (blank) MOE column
//! - line 2: estimate/MOE sub-header (ignored)
//! - line 3..: one row per source; column 0 is the source label and
//!   estimate/MOE pairs start at column 9
//!
//! Header names equal to `Total` or mentioning "year ago" are summary
//! columns and are removed before the remaining names are paired, in
//! order, with the data columns.

use super::csv::{lines, split_line};
use super::labeled_node;
use crate::error::FormatError;
use crate::graph::{Edge, MigrationGraph, NodeId, NodeRegistry};
use crate::normalize::{normalize_id, parse_number};

const DESTINATION_HEADER_LINE: usize = 1;
const FIRST_DATA_LINE: usize = 3;
const MIN_LINES: usize = FIRST_DATA_LINE + 1;

/// First column holding a destination name in the header line
const HEADER_START_COLUMN: usize = 7;
/// First estimate column in a data row
// NOTE: fixed across export vintages; a year with a different number of
// leading summary columns will misalign. See `check_alignment`.
const DATA_START_COLUMN: usize = 9;

/// Ids that name aggregates or non-state areas rather than places
const EXCLUDED_IDS: [&str; 6] = [
    "TOTAL",
    "UNITED_STATES",
    "US_ISLAND_AREA",
    "US_ISLAND_AREAS",
    "ISLAND_AREA",
    "ISLAND_AREAS",
];

fn is_summary_header(name: &str) -> bool {
    name == "Total" || name.to_lowercase().contains("year ago")
}

/// Resolve a label to (id, label) unless it is blank or an aggregate.
fn place(label: &str) -> Option<(NodeId, String)> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    let id = normalize_id(label);
    if id.is_empty() || EXCLUDED_IDS.contains(&id.as_str()) {
        return None;
    }
    Some((NodeId::from_string(id), label.to_string()))
}

/// A destination column group retained from the header line
struct Destination {
    /// Column of the name in the header line
    header_column: usize,
    /// Resolved place, or `None` when the header is excluded
    place: Option<(NodeId, String)>,
}

fn destinations(header: &[String]) -> Vec<Destination> {
    header
        .iter()
        .enumerate()
        .skip(HEADER_START_COLUMN)
        .step_by(2)
        .filter(|(_, name)| !is_summary_header(name.trim()))
        .map(|(header_column, name)| Destination {
            header_column,
            place: place(name),
        })
        .collect()
}

/// Warn when the header's first destination does not sit over the fixed
/// data offset. The offset is still used as-is.
fn check_alignment(destinations: &[Destination]) {
    if let Some(first) = destinations.first() {
        if first.header_column != DATA_START_COLUMN {
            tracing::warn!(
                header_column = first.header_column,
                data_column = DATA_START_COLUMN,
                "legacy destination header does not line up with data columns"
            );
        }
    }
}

/// Parse legacy wide CSV text.
///
/// Fails when there are fewer than four lines or the destination header
/// is too short to hold any destination. Blank, non-positive or
/// unparsable estimates and self-pairs are skipped cell by cell.
pub fn parse_legacy(text: &str) -> Result<MigrationGraph, FormatError> {
    let all = lines(text);
    if all.len() < MIN_LINES {
        return Err(FormatError::TooFewLines {
            expected: MIN_LINES,
            found: all.len(),
        });
    }

    let header = split_line(all[DESTINATION_HEADER_LINE]);
    if header.len() <= HEADER_START_COLUMN {
        return Err(FormatError::TooFewColumns {
            expected: HEADER_START_COLUMN + 1,
            found: header.len(),
        });
    }

    let destinations = destinations(&header);
    check_alignment(&destinations);

    let mut registry = NodeRegistry::new();
    for (id, label) in destinations.iter().filter_map(|d| d.place.as_ref()) {
        registry.ensure(labeled_node(id.clone(), label.clone()));
    }

    let mut edges = Vec::new();
    let mut skipped_cells = 0usize;

    for line in all.iter().skip(FIRST_DATA_LINE) {
        if line.trim().is_empty() {
            continue;
        }
        let row = split_line(line);
        let Some((source_id, source_label)) = row.first().and_then(|label| place(label)) else {
            continue;
        };
        registry.ensure(labeled_node(source_id.clone(), source_label));

        for (i, destination) in destinations.iter().enumerate() {
            let Some((target_id, _)) = &destination.place else {
                continue;
            };
            if *target_id == source_id {
                continue;
            }

            let column = DATA_START_COLUMN + 2 * i;
            let estimate = row.get(column).map(|c| parse_number(c)).unwrap_or(f64::NAN);
            if !estimate.is_finite() || estimate <= 0.0 {
                skipped_cells += 1;
                continue;
            }

            let mut edge = Edge::new(source_id.clone(), target_id.clone(), estimate);
            let moe = row.get(column + 1).map(|c| parse_number(c)).unwrap_or(f64::NAN);
            if moe.is_finite() && moe > 0.0 {
                edge.moe = Some(moe);
            }
            edges.push(edge);
        }
    }

    tracing::debug!(
        edges = edges.len(),
        skipped_cells,
        destinations = destinations.len(),
        "legacy table parsed"
    );

    Ok(registry.into_graph(edges))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a legacy table: destinations after the "year ago" summary,
    /// rows as (source label, [(estimate, moe)] per destination).
    fn table(destinations: &[&str], rows: &[(&str, Vec<(&str, &str)>)]) -> String {
        let mut header = vec![
            "Current residence in".to_string(),
            "Population 1 year and over".into(),
            String::new(),
            "Same house 1 year ago".into(),
            String::new(),
            "Same state of residence 1 year ago".into(),
            String::new(),
            "Different state of residence 1 year ago".into(),
            String::new(),
        ];
        for d in destinations {
            header.push(format!("\"{d}\""));
            header.push(String::new());
        }

        let mut out = String::from("Table 1. State-to-State Migration Flows\n");
        out.push_str(&header.join(","));
        out.push('\n');
        out.push_str(",Estimate,MOE,Estimate,MOE,Estimate,MOE,Estimate,MOE\n");
        for (source, cells) in rows {
            let mut row = vec![format!("\"{source}\"")];
            row.extend(std::iter::repeat(String::from("0")).take(8));
            for (estimate, moe) in cells {
                row.push(format!("\"{estimate}\""));
                row.push(format!("\"{moe}\""));
            }
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    #[test]
    fn pairs_destinations_with_data_columns() {
        let text = table(
            &["Alabama", "Alaska", "Arizona"],
            &[
                ("Alabama", vec![("", ""), ("1,024", "+/-310"), ("57", "+/-40")]),
                ("Alaska", vec![("880", "+/-200"), ("", ""), ("0", "+/-13")]),
            ],
        );
        let graph = parse_legacy(&text).unwrap();
        assert_eq!(graph.validate(), Ok(()));

        let flows: Vec<(&str, &str, f64, Option<f64>)> = graph
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str(), e.value, e.moe))
            .collect();
        assert_eq!(
            flows,
            vec![
                ("ALABAMA", "ALASKA", 1024.0, Some(310.0)),
                ("ALABAMA", "ARIZONA", 57.0, Some(40.0)),
                ("ALASKA", "ALABAMA", 880.0, Some(200.0)),
            ]
        );

        let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Alabama", "Alaska", "Arizona"]);
        assert_eq!(
            graph.nodes[0].categories.get("division").map(String::as_str),
            Some("East South Central")
        );
    }

    // === Scenario: blank self-column never yields a self-edge ===
    #[test]
    fn self_pairs_are_skipped() {
        let text = table(
            &["Ohio", "Iowa"],
            &[
                ("Ohio", vec![("", ""), ("10", "+/-1")]),
                ("Iowa", vec![("20", "+/-2"), ("999", "+/-9")]),
            ],
        );
        let graph = parse_legacy(&text).unwrap();
        assert!(graph.edges.iter().all(|e| e.source != e.target));
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn aggregate_destinations_and_sources_are_excluded() {
        let text = table(
            &["Utah", "United States", "U.S. Island Area", ""],
            &[
                ("Nevada", vec![("5", "+/-1"), ("6", "+/-1"), ("7", "+/-1"), ("8", "+/-1")]),
                ("United States", vec![("100", "+/-1"), ("", ""), ("", ""), ("", "")]),
            ],
        );
        let graph = parse_legacy(&text).unwrap();
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].target.as_str(), "UTAH");

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["NEVADA", "UTAH"]);
    }

    #[test]
    fn zero_moe_is_omitted() {
        let text = table(&["Utah"], &[("Idaho", vec![("42", "+/- 0")])]);
        let graph = parse_legacy(&text).unwrap();
        assert_eq!(graph.edges[0].moe, None);
    }

    #[test]
    fn unparsable_cells_drop_only_that_destination() {
        let text = table(
            &["Utah", "Idaho"],
            &[("Nevada", vec![("N/A", "N/A"), ("12", "+/-3")])],
        );
        let graph = parse_legacy(&text).unwrap();
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].target.as_str(), "IDAHO");
    }

    #[test]
    fn too_few_lines_fail() {
        assert!(matches!(
            parse_legacy("meta\nheader\nsub\n"),
            Err(FormatError::TooFewLines { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn short_header_fails() {
        assert!(matches!(
            parse_legacy("meta\na,b,c\nsub\nrow\n"),
            Err(FormatError::TooFewColumns { found: 3, .. })
        ));
    }
}
