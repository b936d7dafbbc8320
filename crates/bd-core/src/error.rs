//! Core error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` or wrap it as one variant (`SimError::Core`).

use thiserror::Error;

use crate::{BehaviorId, NodeId};

/// The error type for `bd-core` and a common base for sub-crates.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("behavior {0} not found")]
    BehaviorNotFound(BehaviorId),

    #[error("{node} cannot afford cost {cost} with {available} resource left")]
    InsufficientResource {
        node:      NodeId,
        cost:      f64,
        available: f64,
    },
}

/// Shorthand result type for `bd-core`.
pub type CoreResult<T> = Result<T, CoreError>;
