//! YAML configuration for layout geometry and caller-side limits
//!
//! ```yaml
//! layout:
//!   width: 960
//!   height: 600
//!   node_width: 16
//!   node_gap: 8
//! max_snapshot_range: 200
//! ```
//!
//! Every field is optional.

use crate::error::FlowResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry for [`crate::adapter::SankeyLayout`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub node_width: f64,
    /// Vertical gap between stacked nodes
    pub node_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 600.0,
            node_width: 16.0,
            node_gap: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub layout: LayoutConfig,
    /// Widest time range the CLI will materialize snapshot-by-snapshot
    pub max_snapshot_range: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            max_snapshot_range: 200,
        }
    }
}

impl FlowConfig {
    pub fn from_yaml(yaml: &str) -> FlowResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> FlowResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }
}
