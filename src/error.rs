//! Error types for graph construction and analytics queries.

use thiserror::Error;

use crate::graph::models::NodeKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Unknown consumer: {0}")]
    UnknownConsumer(String),

    #[error("Node {id} already exists as {existing}, cannot redeclare it as {requested}")]
    DuplicateNode {
        id: String,
        existing: NodeKind,
        requested: NodeKind,
    },

    #[error("Invalid weight {weight} on edge {from} -> {to}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("Self-loop on node {0}")]
    SelfLoop(String),

    #[error("Edge {from} -> {to} must run from a consumer to a content node")]
    InvalidEdgeDirection { from: String, to: String },

    #[error("Record source error: {0}")]
    Source(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Whether the error concerns a single interaction record (and may be
    /// skipped during a lenient build) rather than the graph as a whole.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            Self::UnknownNode(_)
                | Self::InvalidWeight { .. }
                | Self::SelfLoop(_)
                | Self::InvalidEdgeDirection { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
