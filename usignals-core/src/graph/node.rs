//! Graph Nodes
//!
//! Identity and classification of the nodes in the dependency graph.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a node in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Generate a new unique node ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of node in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A source node. Its value is written directly by its owner and it has
    /// no dependencies, only dependents.
    Source,

    /// A derived node. Its value is produced by a compute function over
    /// at least one dependency.
    Derived,
}

impl NodeKind {
    pub fn is_derived(&self) -> bool {
        matches!(self, NodeKind::Derived)
    }
}
