//! Directed, weighted migration flows

use super::node::{NodeId, Properties, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A directed flow between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Origin node
    pub source: NodeId,
    /// Destination node
    pub target: NodeId,
    /// Flow magnitude (strictly positive in a valid graph)
    pub value: f64,
    /// Margin of error paired with the estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moe: Option<f64>,
    /// Dataset-specific extras (e.g., period)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Properties,
}

impl Edge {
    /// Create a new edge
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
            moe: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Set the margin of error
    pub fn with_moe(mut self, moe: f64) -> Self {
        self.moe = Some(moe);
        self
    }

    /// Add an extra attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Look up a field by name: core fields first, then extra attributes.
    pub fn property(&self, key: &str) -> Option<PropertyValue> {
        match key {
            "source" => Some(PropertyValue::String(self.source.to_string())),
            "target" => Some(PropertyValue::String(self.target.to_string())),
            "value" => Some(PropertyValue::Float(self.value)),
            "moe" => self.moe.map(PropertyValue::Float),
            _ => self.attributes.get(key).cloned(),
        }
    }
}
