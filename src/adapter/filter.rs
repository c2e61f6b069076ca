//! Edge filtering and aggregation used by the data-editing views

use crate::graph::{Edge, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keep edges whose `key` field equals `value`, or contains it when the
/// field is a list.
///
/// `None` and the string `"all"` pass every edge through.
pub fn filter_by_property(edges: &[Edge], key: &str, value: Option<&PropertyValue>) -> Vec<Edge> {
    let value = match value {
        None => return edges.to_vec(),
        Some(PropertyValue::String(s)) if s == "all" => return edges.to_vec(),
        Some(v) => v,
    };

    edges
        .iter()
        .filter(|edge| match edge.property(key) {
            Some(PropertyValue::Array(items)) => items.iter().any(|item| item.matches(value)),
            Some(field) => field.matches(value),
            None => false,
        })
        .cloned()
        .collect()
}

/// Grouping key for [`aggregate_by_key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupBy {
    Source,
    Target,
    SourceTarget,
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(Self::Source),
            "target" => Ok(Self::Target),
            "source-target" => Ok(Self::SourceTarget),
            other => Err(format!("unknown grouping: {}", other)),
        }
    }
}

impl GroupBy {
    fn key(self, edge: &Edge) -> String {
        match self {
            Self::Source => edge.source.to_string(),
            Self::Target => edge.target.to_string(),
            Self::SourceTarget => format!("{}|{}", edge.source, edge.target),
        }
    }
}

/// Merge edges sharing a grouping key.
///
/// `value` is summed. Every other field is last-write-wins: a later edge
/// overwrites the fields it carries (endpoints, a present `moe`, each
/// attribute it sets) and leaves the rest as they were. Groups come out in
/// first-seen order.
pub fn aggregate_by_key(edges: &[Edge], group_by: GroupBy) -> Vec<Edge> {
    let mut order: Vec<Edge> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for edge in edges {
        let key = group_by.key(edge);
        match slots.get(&key) {
            Some(&slot) => {
                let merged = &mut order[slot];
                merged.value += edge.value;
                merged.source = edge.source.clone();
                merged.target = edge.target.clone();
                if edge.moe.is_some() {
                    merged.moe = edge.moe;
                }
                for (k, v) in &edge.attributes {
                    merged.attributes.insert(k.clone(), v.clone());
                }
            }
            None => {
                slots.insert(key, order.len());
                order.push(edge.clone());
            }
        }
    }

    order
}
