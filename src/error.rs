//! Error types

use crate::graph::GraphError;
use thiserror::Error;

/// Structurally invalid input. Always surfaced; never recovered into a
/// partial graph.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("Too few lines: expected at least {expected}, found {found}")]
    TooFewLines { expected: usize, found: usize },

    #[error("Too few columns: expected at least {expected}, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("No <graph> element found")]
    MissingGraphElement,
}

/// Errors surfaced by configuration loading and the command-line tool
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Time range of {span} years exceeds the configured limit of {limit}")]
    RangeTooLarge { span: u64, limit: u64 },
}

/// Result type for crate-level operations
pub type FlowResult<T> = Result<T, FlowError>;
