//! Node representation in the migration graph

use crate::normalize::normalize_id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a node
///
/// Serializes as a plain string. Tabular datasets derive ids from labels
/// via [`NodeId::from_label`]; GEXF datasets keep the file's own ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a NodeId from a string, verbatim
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive a stable id from a free-text label
    ///
    /// The same label always yields the same id, and deriving from an
    /// already-derived id is a no-op.
    pub fn from_label(label: &str) -> Self {
        Self(normalize_id(label))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Typed attribute values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Strict equality where integers and floats compare numerically.
    ///
    /// `Int(5)` matches `Float(5.0)`; `String("5")` matches neither.
    pub fn matches(&self, other: &PropertyValue) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Array(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", rendered.join(","))
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for PropertyValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Properties collection
///
/// Ordered so that serialized output is deterministic.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A place that migrants leave from or arrive at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Display label as it appeared in the source data
    pub label: String,
    /// Categorical attributes (e.g., region, division)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub categories: BTreeMap<String, String>,
    /// Numeric attributes (e.g., population, economic_index)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub numerics: BTreeMap<String, f64>,
}

impl Node {
    /// Create a node with an explicit id
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            categories: BTreeMap::new(),
            numerics: BTreeMap::new(),
        }
    }

    /// Create a node whose id is derived from its label
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(NodeId::from_label(&label), label)
    }

    /// Add a categorical attribute
    pub fn with_category(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.categories.insert(key.into(), value.into());
        self
    }

    /// Add a numeric attribute
    pub fn with_numeric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.numerics.insert(key.into(), value);
        self
    }

    /// Label for display, falling back to the id when the label is blank
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            self.id.as_str()
        } else {
            &self.label
        }
    }
}
