//! Signal errors

use thiserror::Error;

use crate::graph::NodeId;

/// Error type produced by a user compute function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Signal result type
pub type Result<T> = std::result::Result<T, SignalError>;

/// Errors raised by signal construction, mutation and recomputation.
#[derive(Debug, Error)]
pub enum SignalError {
    /// A derived signal was declared without any dependency.
    #[error("derived signal requires at least one dependency")]
    InvalidConstruction,

    /// The proposed dependencies would make the graph cyclic.
    #[error("circular dependency on {node} via {path:?}")]
    CircularDependency { node: NodeId, path: Vec<NodeId> },

    /// A direct write was attempted on a derived signal.
    #[error("cannot set value on derived signal {node}")]
    InvalidMutation { node: NodeId },

    /// The compute function of a derived signal failed.
    #[error("compute function of signal {node} failed: {source}")]
    ComputeFailure {
        node: NodeId,
        #[source]
        source: BoxError,
    },
}

impl SignalError {
    /// The node the error was raised for, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            SignalError::InvalidConstruction => None,
            SignalError::CircularDependency { node, .. }
            | SignalError::InvalidMutation { node }
            | SignalError::ComputeFailure { node, .. } => Some(*node),
        }
    }
}
