//! Quote-aware CSV line handling and schema detection

use super::{legacy, tidy};
use crate::error::FormatError;
use crate::graph::MigrationGraph;

/// The two on-disk tabular schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvSchema {
    /// One row per edge with named columns
    Tidy,
    /// One row per source state with estimate/MOE column pairs per destination
    LegacyWide,
}

/// Split a single CSV line into fields.
///
/// Commas inside double quotes do not delimit; a doubled `""` inside a
/// quoted field is a literal quote.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

/// Split text into lines, tolerating `\r\n` endings.
pub(crate) fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Pick the schema from the header row: tidy when it names both
/// `source_id` and `destination_id`, legacy wide otherwise.
pub fn detect_schema(text: &str) -> CsvSchema {
    let Some(first) = strip_bom(text).lines().next() else {
        return CsvSchema::LegacyWide;
    };
    let header: Vec<String> = split_line(first)
        .iter()
        .map(|cell| cell.trim().to_lowercase())
        .collect();

    let has = |name: &str| header.iter().any(|h| h == name);
    if has("source_id") && has("destination_id") {
        CsvSchema::Tidy
    } else {
        CsvSchema::LegacyWide
    }
}

/// Parse either tabular schema into a [`MigrationGraph`].
///
/// A leading byte-order mark is ignored.
pub fn parse_csv(text: &str) -> Result<MigrationGraph, FormatError> {
    let text = strip_bom(text);
    if text.trim().is_empty() {
        return Err(FormatError::EmptyInput);
    }
    match detect_schema(text) {
        CsvSchema::Tidy => tidy::parse_tidy(text),
        CsvSchema::LegacyWide => legacy::parse_legacy(text),
    }
}
