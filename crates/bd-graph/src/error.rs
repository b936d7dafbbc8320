//! Graph-subsystem error type.

use thiserror::Error;

use bd_core::NodeId;

/// Errors produced by `bd-graph`.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("cannot add {requested} new edges: only {available} node pairs are unconnected")]
    InsufficientCandidatePool { requested: usize, available: usize },
}

pub type GraphResult<T> = Result<T, GraphError>;
